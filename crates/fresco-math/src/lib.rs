#![warn(missing_docs)]

//! Math types for the fresco line renderer.
//!
//! Thin wrappers around nalgebra providing the point, vector and
//! homogeneous-transform types used by the 3D occlusion pipeline:
//! model, view and projection matrices, perspective divide, and the
//! componentwise helpers needed by bounding boxes.

use nalgebra::{Vector3, Vector4};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = nalgebra::Unit<Vector3<f64>>;

/// A point in 2D space.
pub type Point2 = nalgebra::Point2<f64>;

/// Errors raised while building transforms.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The look-at inputs do not span a camera basis: either the eye sits on
    /// the target or the up vector is parallel to the view direction.
    #[error("degenerate camera basis")]
    DegenerateBasis,
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Lengths below this are treated as zero when building camera bases.
pub const BASIS_EPSILON: f64 = 1e-12;

/// A 4x4 homogeneous transformation matrix.
///
/// Immutable value type: every operation returns a new matrix. Composition
/// follows the column-vector convention, so `a.matmul(&b)` applied to a point
/// transforms by `b` first and `a` second, and a camera is composed as
/// `projection.matmul(&view)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    /// The underlying 4x4 matrix.
    pub matrix: nalgebra::Matrix4<f64>,
}

impl Matrix4 {
    /// Build a matrix from its sixteen entries in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn new(
        x00: f64, x01: f64, x02: f64, x03: f64,
        x10: f64, x11: f64, x12: f64, x13: f64,
        x20: f64, x21: f64, x22: f64, x23: f64,
        x30: f64, x31: f64, x32: f64, x33: f64,
    ) -> Self {
        Self {
            matrix: nalgebra::Matrix4::new(
                x00, x01, x02, x03,
                x10, x11, x12, x13,
                x20, x21, x22, x23,
                x30, x31, x32, x33,
            ),
        }
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: nalgebra::Matrix4::identity(),
        }
    }

    /// Translation by `v`.
    pub fn translate(v: &Vec3) -> Self {
        let mut m = nalgebra::Matrix4::identity();
        m[(0, 3)] = v.x;
        m[(1, 3)] = v.y;
        m[(2, 3)] = v.z;
        Self { matrix: m }
    }

    /// Non-uniform scale by `v`.
    pub fn scale(v: &Vec3) -> Self {
        let mut m = nalgebra::Matrix4::identity();
        m[(0, 0)] = v.x;
        m[(1, 1)] = v.y;
        m[(2, 2)] = v.z;
        Self { matrix: m }
    }

    /// Rotation about `axis` (through the origin) by `angle` radians.
    ///
    /// The axis does not need to be normalized. Uses Rodrigues' formula.
    pub fn rotate(axis: &Vec3, angle: f64) -> Self {
        let axis = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let mut m = nalgebra::Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// View matrix for a camera at `eye` looking at `center`.
    ///
    /// Builds the right/up/forward basis, places it at the eye and inverts
    /// it, so the result maps world coordinates into camera space (camera
    /// looking down -Z).
    pub fn look_at(eye: &Point3, center: &Point3, up: &Vec3) -> Result<Self> {
        let forward = center - eye;
        if forward.norm() < BASIS_EPSILON {
            return Err(MathError::DegenerateBasis);
        }
        let f = forward.normalize();
        let side = f.cross(up);
        if side.norm() < BASIS_EPSILON {
            return Err(MathError::DegenerateBasis);
        }
        let s = side.normalize();
        let u = s.cross(&f);
        #[rustfmt::skip]
        let basis = Self::new(
            s.x, u.x, -f.x, eye.x,
            s.y, u.y, -f.y, eye.y,
            s.z, u.z, -f.z, eye.z,
            0.0, 0.0, 0.0, 1.0,
        );
        basis.inverse().ok_or(MathError::DegenerateBasis)
    }

    /// Off-axis perspective frustum projection.
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let t1 = 2.0 * near;
        let t2 = right - left;
        let t3 = top - bottom;
        let t4 = far - near;
        #[rustfmt::skip]
        let m = Self::new(
            t1 / t2, 0.0, (right + left) / t2, 0.0,
            0.0, t1 / t3, (top + bottom) / t3, 0.0,
            0.0, 0.0, (-far - near) / t4, (-t1 * far) / t4,
            0.0, 0.0, -1.0, 0.0,
        );
        m
    }

    /// Orthographic projection of the box `[left, right] x [bottom, top] x [-near, -far]`.
    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Self {
        #[rustfmt::skip]
        let m = Self::new(
            2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left),
            0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom),
            0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near),
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Symmetric perspective projection from a vertical field of view
    /// (radians) and an aspect ratio (width / height).
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let ymax = near * (fovy / 2.0).tan();
        let xmax = ymax * aspect;
        Self::frustum(-xmax, xmax, -ymax, ymax, near, far)
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Matrix4) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point including the perspective divide by the resulting w.
    pub fn apply(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    }

    /// Transform a point by the affine rows only (no perspective divide).
    pub fn position_mul(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction: drops translation and re-normalizes.
    pub fn direction_mul(&self, d: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(d.x, d.y, d.z, 0.0);
        Vec3::new(r.x, r.y, r.z).normalize()
    }

    /// Determinant.
    pub fn det(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Inverse of this matrix, or `None` if it is singular.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Componentwise minimum of two points.
pub fn point_min(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Componentwise maximum of two points.
pub fn point_max(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Linear interpolation between two points.
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}
