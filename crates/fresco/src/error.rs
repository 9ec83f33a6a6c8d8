//! Error types for settings, sketches and export.

use fresco_scene::SceneError;
use thiserror::Error;

/// Errors raised by the fresco facade.
#[derive(Error, Debug)]
pub enum FrescoError {
    /// Scene construction or rendering failed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// IO error while reading settings or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`RenderSettings`](crate::RenderSettings).
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but hold unusable values.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// No sketch with this name exists.
    #[error("unknown sketch '{0}'")]
    UnknownSketch(String),
}

/// Result type for fresco operations.
pub type Result<T> = std::result::Result<T, FrescoError>;
