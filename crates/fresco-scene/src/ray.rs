//! Ray representation and closest-hit results.

use fresco_math::{Dir3, Matrix4, Point3, Vec3};

use crate::shape::Shape3D;

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
    /// Precomputed reciprocal of direction components for fast slab tests.
    inv_direction: Vec3,
    /// Sign of direction components (0 if positive, 1 if negative).
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let dir = Dir3::new_normalize(direction);
        let inv = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
        let sign = [
            usize::from(inv.x < 0.0),
            usize::from(inv.y < 0.0),
            usize::from(inv.z < 0.0),
        ];
        Self {
            origin,
            direction: dir,
            inv_direction: inv,
            sign,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Reciprocal direction, one component per axis.
    #[inline]
    pub fn inv_direction(&self) -> &Vec3 {
        &self.inv_direction
    }

    /// Per-axis sign of the direction (0 if positive, 1 if negative).
    #[inline]
    pub fn sign(&self) -> [usize; 3] {
        self.sign
    }

    /// Transform the ray: the origin as a position, the direction as a
    /// translation-free vector.
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        Self::new(
            matrix.position_mul(&self.origin),
            matrix.direction_mul(self.direction.as_ref()),
        )
    }
}

/// Closest intersection of a ray with a set of shapes.
///
/// `shape` borrows the shape that was hit; it never owns it. [`Hit::NONE`]
/// has no shape and an infinite distance, so it loses every comparison.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The shape that was hit, if any.
    pub shape: Option<&'a Shape3D>,
    /// Distance along the ray.
    pub t: f64,
}

impl<'a> Hit<'a> {
    /// The "no hit" sentinel.
    pub const NONE: Self = Self {
        shape: None,
        t: f64::INFINITY,
    };

    /// Create a hit on `shape` at distance `t`.
    pub fn new(shape: &'a Shape3D, t: f64) -> Self {
        Self {
            shape: Some(shape),
            t,
        }
    }

    /// True if this is a real hit rather than the sentinel.
    pub fn is_hit(&self) -> bool {
        self.shape.is_some() && self.t < f64::INFINITY
    }

    /// The nearer of two hits; ties keep `self`.
    pub fn min(self, other: Self) -> Self {
        if other.t < self.t {
            other
        } else {
            self
        }
    }

    /// The farther of two hits; ties keep `self`.
    pub fn max(self, other: Self) -> Self {
        if other.t > self.t {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Cube;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let p = ray.at(5.0);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_sign() {
        let ray = Ray::new(Point3::origin(), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(ray.sign(), [1, 0, 1]);
        assert!(ray.inv_direction().x < 0.0);
    }

    #[test]
    fn test_ray_transform() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let m = Matrix4::translate(&Vec3::new(0.0, 5.0, 0.0))
            .matmul(&Matrix4::rotate(&Vec3::y(), std::f64::consts::FRAC_PI_2));
        let moved = ray.transform(&m);
        assert_abs_diff_eq!(moved.origin.y, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(moved.origin.z, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(moved.direction.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hit_min_max() {
        let cube = Shape3D::from(Cube::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)));
        let near = Hit::new(&cube, 1.0);
        let far = Hit::new(&cube, 3.0);
        assert_eq!(near.min(far).t, 1.0);
        assert_eq!(far.min(near).t, 1.0);
        assert_eq!(near.max(far).t, 3.0);
        assert_eq!(Hit::NONE.min(near).t, 1.0);
        assert!(!Hit::NONE.is_hit());
        assert!(near.is_hit());
    }
}
