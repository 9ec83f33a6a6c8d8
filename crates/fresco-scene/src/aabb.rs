//! Axis-aligned bounding boxes.

use fresco_math::{point_max, point_min, Matrix4, Point3, Vec3};

use crate::path::Polyline;
use crate::ray::Ray;

/// Hits closer than this to the ray origin are ignored by [`Aabb3::ray_hit`].
pub const BOX_EPSILON: f64 = 1e-3;

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All three axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component of a point along this axis.
    #[inline]
    pub fn of(self, p: &Point3) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }

    /// Component of a vector along this axis.
    #[inline]
    pub fn of_vec(self, v: &Vec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Axis-aligned bounding box in 3D.
///
/// Boxes built with [`Aabb3::new`] satisfy `min <= max` componentwise.
/// Zero-volume boxes (around a flat quad, say) are valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB spanning two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: point_min(&a, &b),
            max: point_max(&a, &b),
        }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing all `points`.
    pub fn for_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = point_min(&self.min, p);
        self.max = point_max(&self.max, p);
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb3) -> Self {
        Self {
            min: point_min(&self.min, &other.min),
            max: point_max(&self.max, &other.max),
        }
    }

    /// Overlap of two boxes, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Aabb3) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            min: point_max(&self.min, &other.min),
            max: point_min(&self.max, &other.max),
        })
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// True if `p` lies within `[min, max]` on every axis, bounds included.
    pub fn contains(&self, p: &Point3) -> bool {
        self.contains_with_tolerance(p, 0.0)
    }

    /// Containment against the box grown by `tolerance` on every side.
    ///
    /// A negative tolerance shrinks the box.
    pub fn contains_with_tolerance(&self, p: &Point3, tolerance: f64) -> bool {
        p.x >= self.min.x - tolerance
            && p.x <= self.max.x + tolerance
            && p.y >= self.min.y - tolerance
            && p.y <= self.max.y + tolerance
            && p.z >= self.min.z - tolerance
            && p.z <= self.max.z + tolerance
    }

    /// Edge lengths of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Which sides of the plane `axis = point` the box touches.
    ///
    /// Returns `(left, right)`: `left` if the box reaches down to the plane,
    /// `right` if it reaches up to it. A box straddling the plane is on both.
    pub fn partition(&self, axis: Axis, point: f64) -> (bool, bool) {
        (axis.of(&self.min) <= point, axis.of(&self.max) >= point)
    }

    /// Bounding box of the eight transformed corners.
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        let mut aabb = Self::empty();
        for corner in self.corners() {
            aabb.include_point(&matrix.apply(&corner));
        }
        aabb
    }

    /// The eight corners, bottom face (`min.z`) first.
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(a.x, b.y, b.z),
        ]
    }

    /// The twelve edges as two-point polylines.
    pub fn outline(&self) -> Vec<Polyline> {
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let c = self.corners();
        EDGES
            .iter()
            .map(|&(i, j)| Polyline::segment(c[i], c[j]))
            .collect()
    }

    /// Parametric entry and exit of a ray through the box (slab method).
    ///
    /// Returns `(t_min, t_max)` unclamped; the ray misses when
    /// `t_max < t_min`. Axes where the ray runs parallel to a zero-width
    /// slab produce NaN and are skipped by the min/max folds.
    #[inline]
    pub fn intersect_interval(&self, ray: &Ray) -> (f64, f64) {
        let bounds = [self.min, self.max];
        let sign = ray.sign();
        let inv = ray.inv_direction();

        let tx1 = (bounds[sign[0]].x - ray.origin.x) * inv.x;
        let tx2 = (bounds[1 - sign[0]].x - ray.origin.x) * inv.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[sign[1]].y - ray.origin.y) * inv.y;
        let ty2 = (bounds[1 - sign[1]].y - ray.origin.y) * inv.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[sign[2]].z - ray.origin.z) * inv.z;
        let tz2 = (bounds[1 - sign[2]].z - ray.origin.z) * inv.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        (t_min, t_max)
    }

    /// Distance to the box surface along `ray`, treating the box as solid.
    ///
    /// When the origin is inside the box (entry behind, exit ahead) this
    /// reports the exit distance, the nearest forward crossing of the
    /// surface. Crossings closer than [`BOX_EPSILON`] are ignored so that a
    /// ray leaving a point on the surface does not hit that surface.
    pub fn ray_hit(&self, ray: &Ray) -> Option<f64> {
        let (t_min, t_max) = self.intersect_interval(ray);
        if t_min < BOX_EPSILON && t_max > BOX_EPSILON {
            Some(t_max)
        } else if t_min >= BOX_EPSILON && t_min <= t_max {
            Some(t_min)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb3::new(Point3::new(1.0, -1.0, 5.0), Point3::new(-1.0, 1.0, 2.0));
        assert_eq!(b.min, Point3::new(-1.0, -1.0, 2.0));
        assert_eq!(b.max, Point3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_contains_inclusive() {
        let b = unit_box();
        assert!(b.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(b.contains(&Point3::new(0.0, 1.0, 0.0)));
        assert!(b.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(&Point3::new(1.0 + 1e-9, 0.5, 0.5)));
        assert!(!b.contains(&Point3::new(0.5, -1e-9, 0.5)));
        assert!(b.contains_with_tolerance(&Point3::new(1.05, 0.5, 0.5), 0.1));
        assert!(!b.contains_with_tolerance(&Point3::new(0.95, 0.5, 0.5), -0.1));
    }

    #[test]
    fn test_union_and_intersection() {
        let a = unit_box();
        let b = Aabb3::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(2.0, 2.0, 2.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Point3::new(0.5, 0.5, 0.5));
        assert_eq!(i.max, Point3::new(1.0, 1.0, 1.0));
        let far = Aabb3::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn test_partition() {
        let b = unit_box();
        assert_eq!(b.partition(Axis::X, 0.5), (true, true));
        assert_eq!(b.partition(Axis::Y, 2.0), (true, false));
        assert_eq!(b.partition(Axis::Z, -1.0), (false, true));
        assert_eq!(b.partition(Axis::Z, 1.0), (true, true));
    }

    #[test]
    fn test_empty_and_for_points() {
        assert!(Aabb3::empty().is_empty());
        let pts = [Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.0, 4.0)];
        let b = Aabb3::for_points(pts.iter());
        assert!(!b.is_empty());
        assert_eq!(b.min, Point3::new(-1.0, 0.0, 3.0));
        assert_eq!(b.max, Point3::new(1.0, 2.0, 4.0));
        assert_eq!(b.center(), Point3::new(0.0, 1.0, 3.5));
    }

    #[test]
    fn test_outline_has_twelve_edges() {
        let edges = unit_box().outline();
        assert_eq!(edges.len(), 12);
        let total: f64 = edges.iter().map(Polyline::length).sum();
        assert_abs_diff_eq!(total, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform() {
        let b = unit_box().transform(&Matrix4::translate(&Vec3::new(1.0, 2.0, 3.0)));
        assert_abs_diff_eq!(b.min.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.max.z, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_hit_from_outside() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let (t_min, t_max) = unit_box().intersect_interval(&ray);
        assert_abs_diff_eq!(t_min, 5.0, epsilon = 1e-10);
        assert_abs_diff_eq!(t_max, 6.0, epsilon = 1e-10);
        assert_abs_diff_eq!(unit_box().ray_hit(&ray).unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_hit_from_inside_reports_exit() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(unit_box().ray_hit(&ray).unwrap(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_leaving_surface_misses() {
        // Starts on the +X face and points away
        let ray = Ray::new(Point3::new(1.0, 0.5, 0.5), Vec3::new(1.0, 0.2, 0.0));
        assert!(unit_box().ray_hit(&ray).is_none());
    }

    #[test]
    fn test_ray_miss_and_behind() {
        let miss = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(unit_box().ray_hit(&miss).is_none());
        let behind = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(unit_box().ray_hit(&behind).is_none());
    }

    #[test]
    fn test_ray_toward_center_has_ordered_interval() {
        let b = Aabb3::new(Point3::new(-2.0, -1.0, 3.0), Point3::new(1.0, 4.0, 5.0));
        for origin in [
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(-7.0, 0.0, 4.0),
            Point3::new(0.3, -9.0, -2.0),
        ] {
            let ray = Ray::new(origin, b.center() - origin);
            let (t_min, t_max) = b.intersect_interval(&ray);
            assert!(t_min >= 0.0);
            assert!(t_min <= t_max);
        }
    }

    #[test]
    fn test_degenerate_box_does_not_panic() {
        // Flat box in the z = 0 plane
        let flat = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let through = Ray::new(Point3::new(0.5, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(flat.ray_hit(&through).unwrap(), 5.0, epsilon = 1e-10);
        let along = Ray::new(Point3::new(-1.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let (t_min, t_max) = flat.intersect_interval(&along);
        assert!(t_min <= t_max);
    }
}
