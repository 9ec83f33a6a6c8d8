//! Error types for scene construction and rendering.

use fresco_math::MathError;
use thiserror::Error;

/// Errors that can occur while building or rendering a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The camera transform could not be built.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Viewport dimensions must be finite and positive.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },

    /// The near/far clip distances do not describe a valid depth range.
    #[error("invalid clip range: near={near}, far={far}")]
    InvalidClipRange {
        /// Near clip distance.
        near: f64,
        /// Far clip distance.
        far: f64,
    },

    /// A polygon occluder needs at least three non-collinear vertices.
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
