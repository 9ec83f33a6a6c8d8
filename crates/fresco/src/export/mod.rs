//! Writers for rendered drawings.
//!
//! Rendered polylines are in centered pixel space (origin in the middle
//! of the image, both axes inverted). Exporters map them back to the
//! usual top-left image origin.

pub mod json;
pub mod svg;

pub use json::{write_json, Drawing, DrawingPath};
pub use svg::SvgDocument;
