#![warn(missing_docs)]

//! fresco: pen-plotter line art from hidden-line rendered 3D sketches.
//!
//! Re-exports the math and scene crates and adds what a drawing program
//! needs around them: TOML render settings, SVG and JSON export, and a
//! set of demo sketches.
//!
//! # Example
//!
//! ```rust,no_run
//! use fresco::{render_sketch, RenderSettings, Sketch, SvgDocument};
//!
//! let settings = RenderSettings::default();
//! let paths = render_sketch(Sketch::MoonCity, &settings)?;
//!
//! let mut doc = SvgDocument::from_settings(&settings.viewport()?, &settings);
//! doc.add_paths(paths);
//! doc.export("moon-city.svg")?;
//! # Ok::<(), fresco::FrescoError>(())
//! ```

mod error;
pub mod export;
pub mod settings;
pub mod sketches;

pub use fresco_math as math;
pub use fresco_scene as scene;

pub use error::{FrescoError, Result};
pub use export::{write_json, Drawing, DrawingPath, SvgDocument};
pub use fresco_math::{Matrix4, Point2, Point3, Vec3};
pub use fresco_scene::{
    BooleanShape, Camera, Cube, Polygon, Polyline, Projection, RenderOptions, Scene, Shape3D,
    Stroke, Tri3D, Viewport,
};
pub use settings::RenderSettings;
pub use sketches::Sketch;

use tracing::info;

/// Build `sketch` with the settings' seed and render it.
pub fn render_sketch(sketch: Sketch, settings: &RenderSettings) -> Result<Vec<Polyline>> {
    settings.validate()?;
    let (scene, camera) = sketch.build(settings.seed)?;
    let viewport = settings.viewport()?;
    let paths = scene.render_with_options(&camera, &viewport, &settings.render_options())?;
    info!(
        sketch = sketch.name(),
        paths = paths.len(),
        vertices = paths.iter().map(Polyline::len).sum::<usize>(),
        "rendered sketch"
    );
    Ok(paths)
}
