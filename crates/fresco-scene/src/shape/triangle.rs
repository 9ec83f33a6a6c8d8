//! Triangle occluders and the Möller-Trumbore intersection test.

use fresco_math::{Point3, Vec3};

use crate::aabb::Aabb3;
use crate::path::Polyline;
use crate::ray::Ray;

/// Determinant threshold below which a ray is treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Hits closer than this are ignored.
const MIN_DISTANCE: f64 = 1e-9;

/// Ray parameter and barycentric coordinates of a triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray.
    pub t: f64,
    /// Barycentric weight of the second vertex.
    pub u: f64,
    /// Barycentric weight of the third vertex.
    pub v: f64,
}

/// A single triangle with its bounds cached at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tri3D {
    vertices: [Point3; 3],
    bounds: Aabb3,
}

impl Tri3D {
    /// Create a triangle from three vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        let vertices = [a, b, c];
        Self {
            bounds: Aabb3::for_points(vertices.iter()),
            vertices,
        }
    }

    /// The three vertices.
    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    /// Cached bounding box.
    pub fn bounding_box(&self) -> Aabb3 {
        self.bounds
    }

    /// Unnormalized face normal `(b - a) x (c - a)`.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    /// True if `p` lies within `tolerance` of the triangle's plane and
    /// projects inside its edges. A negative tolerance never matches.
    pub fn contains(&self, p: &Point3, tolerance: f64) -> bool {
        let [a, b, c] = self.vertices;
        let n = self.normal();
        let area2 = n.norm_squared();
        if area2 < PARALLEL_EPSILON * PARALLEL_EPSILON {
            return false;
        }
        let d = p - a;
        if (d.dot(&n) / area2.sqrt()).abs() > tolerance {
            return false;
        }
        // Barycentric weights of the in-plane projection.
        let u = (c - a).cross(&d).dot(&n) / -area2;
        let v = (b - a).cross(&d).dot(&n) / area2;
        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// Distance along `ray` to the triangle.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.intersect_barycentric(ray).map(|hit| hit.t)
    }

    /// Möller-Trumbore test, also reporting where on the triangle the ray
    /// landed.
    pub fn intersect_barycentric(&self, ray: &Ray) -> Option<TriangleHit> {
        let [v0, v1, v2] = self.vertices;
        let dir = ray.direction.as_ref();

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let h = dir.cross(&edge2);
        let det = edge1.dot(&h);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - v0;
        let u = inv_det * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = inv_det * dir.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(&q);
        (t > MIN_DISTANCE).then_some(TriangleHit { t, u, v })
    }

    /// The closed triangle outline.
    pub fn paths(&self) -> Vec<Polyline> {
        vec![Polyline::closed(self.vertices.to_vec())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tri() -> Tri3D {
        Tri3D::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_hit() {
        let ray = Ray::new(Point3::new(0.25, 0.25, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = tri().intersect_barycentric(&ray).unwrap();
        assert_abs_diff_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.u, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.v, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_hit_from_behind() {
        let ray = Ray::new(Point3::new(0.25, 0.25, -3.0), Vec3::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(tri().intersect(&ray).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_miss_outside() {
        let ray = Ray::new(Point3::new(0.8, 0.8, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri().intersect(&ray).is_none());
    }

    #[test]
    fn test_miss_parallel() {
        let ray = Ray::new(Point3::new(-1.0, 0.25, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(tri().intersect(&ray).is_none());
    }

    #[test]
    fn test_miss_behind_origin() {
        let ray = Ray::new(Point3::new(0.25, 0.25, 2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(tri().intersect(&ray).is_none());
    }

    #[test]
    fn test_contains() {
        let t = tri();
        assert!(t.contains(&Point3::new(0.25, 0.25, 0.0), 0.0));
        assert!(t.contains(&Point3::new(0.25, 0.25, 5e-4), 1e-3));
        assert!(!t.contains(&Point3::new(0.25, 0.25, 2e-3), 1e-3));
        assert!(!t.contains(&Point3::new(0.8, 0.8, 0.0), 1e-3));
        assert!(!t.contains(&Point3::new(-0.1, 0.5, 0.0), 1e-3));
        // A flat shape has no interior to shrink into.
        assert!(!t.contains(&Point3::new(0.25, 0.25, 0.0), -1e-3));
    }

    #[test]
    fn test_contains_matches_polygon() {
        use crate::shape::Polygon;

        let (a, b, c) = (
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let t = Tri3D::new(a, b, c);
        let poly = Polygon::new(vec![a, b, c]).unwrap();
        for p in [
            Point3::origin(),
            Point3::new(0.4, -0.6, 0.0),
            Point3::new(0.9, 0.9, 0.0),
            Point3::new(0.0, 0.0, 0.5),
        ] {
            assert_eq!(t.contains(&p, 1e-3), poly.contains(&p, 1e-3), "{p:?}");
        }
    }

    #[test]
    fn test_centroid_rays_land_inside() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(17);
        let point = |rng: &mut StdRng| {
            Point3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            )
        };
        let mut tested = 0;
        while tested < 200 {
            let t = Tri3D::new(point(&mut rng), point(&mut rng), point(&mut rng));
            let n = t.normal();
            if n.norm() < 1e-2 {
                continue;
            }
            let n = n.normalize();
            let [a, b, c] = *t.vertices();
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            let k: f64 = rng.random_range(0.5..20.0);
            let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let ray = Ray::new(centroid + n * (k * side), -n * side);

            let hit = t.intersect_barycentric(&ray).unwrap();
            assert!(hit.u >= 0.0 && hit.v >= 0.0, "{hit:?}");
            assert!(hit.u + hit.v <= 1.0 + 1e-12, "{hit:?}");
            assert_abs_diff_eq!(hit.t, k, epsilon = 1e-6);
            tested += 1;
        }
    }

    #[test]
    fn test_bounds_and_paths() {
        let t = tri();
        assert_eq!(t.bounding_box().max, Point3::new(1.0, 1.0, 0.0));
        let paths = t.paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 4);
        assert_abs_diff_eq!(t.normal().z, 1.0, epsilon = 1e-12);
    }
}
