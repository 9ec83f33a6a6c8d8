//! Constructive combination of two shapes.

use fresco_math::Point3;
use tracing::warn;

use crate::aabb::Aabb3;
use crate::path::Polyline;
use crate::ray::Ray;
use crate::shape::Shape3D;

/// Upper bound on re-cast rays when stepping through surfaces that are
/// not part of the combined shape.
pub const MAX_PEEL_STEPS: usize = 64;

/// Distance a re-cast ray starts past the rejected surface.
const PEEL_OFFSET: f64 = 1e-3;

/// Containment tolerance for surface points.
const CONTAINS_TOLERANCE: f64 = 1e-3;

/// Spacing of the samples used to trim child outlines.
const OUTLINE_STEP: f64 = 0.01;

/// How the two operands are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Points in both `a` and `b`.
    Intersection,
    /// Points in `a` but not in `b`.
    Difference,
}

/// Intersection or difference of two shapes.
///
/// Operands are owned and fixed at construction, so compositions always
/// form a tree.
#[derive(Debug, Clone)]
pub struct BooleanShape {
    op: BooleanOp,
    a: Box<Shape3D>,
    b: Box<Shape3D>,
}

impl BooleanShape {
    /// Combine two shapes with `op`.
    pub fn new(op: BooleanOp, a: impl Into<Shape3D>, b: impl Into<Shape3D>) -> Self {
        Self {
            op,
            a: Box::new(a.into()),
            b: Box::new(b.into()),
        }
    }

    /// The region inside both shapes.
    pub fn intersection(a: impl Into<Shape3D>, b: impl Into<Shape3D>) -> Self {
        Self::new(BooleanOp::Intersection, a, b)
    }

    /// The region inside `a` with `b` carved out.
    pub fn difference(a: impl Into<Shape3D>, b: impl Into<Shape3D>) -> Self {
        Self::new(BooleanOp::Difference, a, b)
    }

    /// The combining operation.
    pub fn op(&self) -> BooleanOp {
        self.op
    }

    /// Bounds of the result: the overlap for intersections, `a` for
    /// differences.
    pub fn bounding_box(&self) -> Aabb3 {
        let a = self.a.bounding_box();
        match self.op {
            BooleanOp::Intersection => a
                .intersection(&self.b.bounding_box())
                .unwrap_or_else(Aabb3::empty),
            BooleanOp::Difference => a,
        }
    }

    /// Containment of the combined shape. For differences the carved
    /// shape is tested with the tolerance negated, so points on its
    /// surface stay inside the result.
    pub fn contains(&self, p: &Point3, tolerance: f64) -> bool {
        match self.op {
            BooleanOp::Intersection => {
                self.a.contains(p, tolerance) && self.b.contains(p, tolerance)
            }
            BooleanOp::Difference => {
                self.a.contains(p, tolerance) && !self.b.contains(p, -tolerance)
            }
        }
    }

    /// Nearest crossing of the combined surface.
    ///
    /// Each step takes the nearer operand hit. If that point is not on the
    /// combined shape, a new ray is cast from just beyond it. After
    /// [`MAX_PEEL_STEPS`] rejected surfaces the distance travelled so far is
    /// reported, so the caller treats whatever lies behind as occluded.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.peel(ray, MAX_PEEL_STEPS)
    }

    fn peel(&self, ray: &Ray, max_steps: usize) -> Option<f64> {
        let direction = *ray.direction.as_ref();
        let mut current = *ray;
        let mut travelled = 0.0;
        for _ in 0..max_steps {
            let t = match (self.a.intersect(&current), self.b.intersect(&current)) {
                (Some(ta), Some(tb)) => ta.min(tb),
                (Some(t), None) | (None, Some(t)) => t,
                (None, None) => return None,
            };
            if self.contains(&current.at(t), CONTAINS_TOLERANCE) {
                return Some(travelled + t);
            }
            travelled += t + PEEL_OFFSET;
            current = Ray::new(current.at(t + PEEL_OFFSET), direction);
        }
        warn!(
            steps = max_steps,
            travelled,
            "occlusion resolution depth exceeded, treating as occluded"
        );
        Some(travelled)
    }

    /// Outlines of both operands, trimmed to the parts that lie on the
    /// combined shape.
    pub fn paths(&self) -> Vec<Polyline> {
        self.a
            .paths()
            .into_iter()
            .chain(self.b.paths())
            .flat_map(|path| {
                path.chop(OUTLINE_STEP)
                    .filter(|p| self.contains(p, CONTAINS_TOLERANCE).then_some(*p))
            })
            .collect()
    }
}
