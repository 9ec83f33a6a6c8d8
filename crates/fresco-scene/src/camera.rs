//! Camera placement, projection and the output viewport.

use fresco_math::{Matrix4, Point3, Vec3};

use crate::error::{Result, SceneError};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Create a viewport; both sides must be finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SceneError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Scale a clip-space point to pixels, centered on the origin with
    /// both axes inverted. Depth is dropped.
    pub fn to_pixels(&self, p: &Point3) -> Point3 {
        Point3::new(p.x * -self.width / 2.0, p.y * -self.height / 2.0, 0.0)
    }
}

/// How view space is mapped to clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective with a vertical field of view in radians.
    Perspective {
        /// Vertical field of view (radians).
        fovy: f64,
    },
    /// Parallel projection showing `2 * half_height` world units
    /// vertically; the width follows the viewport aspect.
    Orthographic {
        /// Half the visible height in world units.
        half_height: f64,
    },
}

/// A look-at camera with a projection and depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub eye: Point3,
    /// Point the camera looks at.
    pub center: Point3,
    /// Up hint; must not be parallel to the view direction.
    pub up: Vec3,
    /// Projection model.
    pub projection: Projection,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Camera {
    /// Perspective camera with vertical field of view `fovy` (radians).
    pub fn perspective(eye: Point3, center: Point3, up: Vec3, fovy: f64, near: f64, far: f64) -> Self {
        Self {
            eye,
            center,
            up,
            projection: Projection::Perspective { fovy },
            near,
            far,
        }
    }

    /// Orthographic camera showing `2 * half_height` units vertically.
    pub fn orthographic(
        eye: Point3,
        center: Point3,
        up: Vec3,
        half_height: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            eye,
            center,
            up,
            projection: Projection::Orthographic { half_height },
            near,
            far,
        }
    }

    /// World to view transform.
    pub fn view(&self) -> Result<Matrix4> {
        Ok(Matrix4::look_at(&self.eye, &self.center, &self.up)?)
    }

    /// View to clip transform for `viewport`.
    pub fn projection_matrix(&self, viewport: &Viewport) -> Result<Matrix4> {
        let (near, far) = (self.near, self.far);
        let aspect = viewport.aspect();
        match self.projection {
            Projection::Perspective { fovy } => {
                if !(near > 0.0 && far > near && far.is_finite()) {
                    return Err(SceneError::InvalidClipRange { near, far });
                }
                Ok(Matrix4::perspective(fovy, aspect, near, far))
            }
            Projection::Orthographic { half_height } => {
                if !(far > near && near.is_finite() && far.is_finite()) {
                    return Err(SceneError::InvalidClipRange { near, far });
                }
                let half_width = half_height * aspect;
                Ok(Matrix4::orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    near,
                    far,
                ))
            }
        }
    }

    /// Full world to clip transform: projection after view.
    pub fn matrix(&self, viewport: &Viewport) -> Result<Matrix4> {
        Ok(self.projection_matrix(viewport)?.matmul(&self.view()?))
    }
}
