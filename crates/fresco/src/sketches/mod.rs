//! Demo sketches.
//!
//! Each sketch builds a [`Scene`] and a [`Camera`] from a seed. Rendering
//! the same sketch with the same seed always gives the same drawing.

mod carved;
mod cube;
mod moon_city;
mod pyramid_city;
mod sin_city;
mod sphere;

use std::fmt;
use std::str::FromStr;

use fresco_math::{Point3, Vec3};
use fresco_scene::{Camera, Polyline, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{FrescoError, Result};

/// The built-in sketches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sketch {
    /// One hatched cube.
    Cube,
    /// Blocks of buildings under a moon.
    MoonCity,
    /// A grid of pyramids.
    PyramidCity,
    /// Towers whose heights follow a sine field.
    SinCity,
    /// A globe of latitude and longitude lines.
    Sphere,
    /// Boolean-carved blocks on a polygon plinth.
    Carved,
}

impl Sketch {
    /// Every sketch, in listing order.
    pub const ALL: [Sketch; 6] = [
        Sketch::Cube,
        Sketch::MoonCity,
        Sketch::PyramidCity,
        Sketch::SinCity,
        Sketch::Sphere,
        Sketch::Carved,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Sketch::Cube => "cube",
            Sketch::MoonCity => "moon-city",
            Sketch::PyramidCity => "pyramid-city",
            Sketch::SinCity => "sin-city",
            Sketch::Sphere => "sphere",
            Sketch::Carved => "carved",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Sketch::Cube => "a single cube with hatched sides",
            Sketch::MoonCity => "city blocks of striped towers under a moon",
            Sketch::PyramidCity => "a grid of triangle-faced pyramids",
            Sketch::SinCity => "towers with heights from a sine field",
            Sketch::Sphere => "a globe drawn with latitude and longitude lines",
            Sketch::Carved => "intersected and carved blocks on a hexagonal plinth",
        }
    }

    /// Build the scene and camera for `seed`.
    pub fn build(self, seed: u64) -> Result<(Scene, Camera)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let built = match self {
            Sketch::Cube => cube::build(&mut rng),
            Sketch::MoonCity => moon_city::build(&mut rng),
            Sketch::PyramidCity => pyramid_city::build(&mut rng),
            Sketch::SinCity => sin_city::build(&mut rng),
            Sketch::Sphere => sphere::build(&mut rng),
            Sketch::Carved => carved::build(&mut rng),
        }?;
        debug!(
            sketch = self.name(),
            seed,
            shapes = built.0.shape_count(),
            overlays = built.0.overlay_count(),
            "built sketch"
        );
        Ok(built)
    }
}

impl fmt::Display for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sketch {
    type Err = FrescoError;

    fn from_str(s: &str) -> Result<Self> {
        Sketch::ALL
            .into_iter()
            .find(|sketch| sketch.name() == s)
            .ok_or_else(|| FrescoError::UnknownSketch(s.to_string()))
    }
}

/// Closed circle of `segments` vertices in the plane spanned by `u` and `v`.
pub(crate) fn circle(center: Point3, u: Vec3, v: Vec3, radius: f64, segments: usize) -> Polyline {
    let (u, v) = (u.normalize(), v.normalize());
    Polyline::closed(
        (0..segments)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / segments as f64;
                center + (u * a.cos() + v * a.sin()) * radius
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderSettings;
    use approx::assert_abs_diff_eq;

    fn quick_settings() -> RenderSettings {
        RenderSettings {
            width: 400.0,
            height: 400.0,
            subdivision_step: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_names_round_trip() {
        for sketch in Sketch::ALL {
            assert_eq!(sketch.name().parse::<Sketch>().unwrap(), sketch);
            assert_eq!(sketch.to_string(), sketch.name());
        }
        assert!(matches!(
            "teapot".parse::<Sketch>(),
            Err(FrescoError::UnknownSketch(name)) if name == "teapot"
        ));
    }

    #[test]
    fn test_every_sketch_renders() {
        let settings = quick_settings();
        let viewport = settings.viewport().unwrap();
        for sketch in Sketch::ALL {
            let (scene, camera) = sketch.build(1).unwrap();
            let paths = scene
                .render_with_options(&camera, &viewport, &settings.render_options())
                .unwrap();
            assert!(!paths.is_empty(), "{sketch} rendered nothing");
            for path in &paths {
                assert!(path.len() >= 2);
                for p in &path.points {
                    assert!(p.x.abs() <= 200.0 + 1e-9 && p.y.abs() <= 200.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_drawing() {
        let settings = quick_settings();
        let viewport = settings.viewport().unwrap();
        let render = |seed| {
            let (scene, camera) = Sketch::MoonCity.build(seed).unwrap();
            scene
                .render_with_options(&camera, &viewport, &settings.render_options())
                .unwrap()
        };
        assert_eq!(render(5), render(5));
        assert_ne!(render(5), render(6));
    }

    #[test]
    fn test_circle() {
        let c = circle(Point3::new(1.0, 0.0, 0.0), Vec3::x(), Vec3::y(), 2.0, 8);
        assert_eq!(c.len(), 9);
        for p in &c.points {
            assert_abs_diff_eq!((p - Point3::new(1.0, 0.0, 0.0)).norm(), 2.0, epsilon = 1e-12);
        }
    }
}
