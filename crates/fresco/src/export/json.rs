//! JSON dump of rendered polylines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fresco_scene::{Polyline, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One rendered polyline in SVG-style coordinates (top-left origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingPath {
    /// Vertices as `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
    /// RGB stroke color.
    pub color: [u8; 3],
    /// Stroke weight.
    pub weight: f64,
}

/// A rendered drawing ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Polylines in drawing order.
    pub paths: Vec<DrawingPath>,
}

impl Drawing {
    /// Convert rendered polylines for `viewport`.
    pub fn new(viewport: &Viewport, paths: &[Polyline]) -> Self {
        let (cx, cy) = (viewport.width() / 2.0, viewport.height() / 2.0);
        Self {
            width: viewport.width(),
            height: viewport.height(),
            paths: paths
                .iter()
                .map(|path| DrawingPath {
                    points: path.points.iter().map(|p| [cx - p.x, cy + p.y]).collect(),
                    color: path.stroke.color,
                    weight: path.stroke.weight,
                })
                .collect(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write rendered polylines as JSON.
pub fn write_json(path: impl AsRef<Path>, viewport: &Viewport, paths: &[Polyline]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &Drawing::new(viewport, paths))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_math::Point3;

    #[test]
    fn test_drawing_coordinates() {
        let viewport = Viewport::new(100.0, 100.0).unwrap();
        let drawing = Drawing::new(
            &viewport,
            &[Polyline::segment(
                Point3::new(50.0, 50.0, 0.0),
                Point3::new(-50.0, -50.0, 0.0),
            )],
        );
        assert_eq!(drawing.paths[0].points, vec![[0.0, 100.0], [100.0, 0.0]]);
        assert_eq!(drawing.paths[0].color, [0, 0, 0]);
    }

    #[test]
    fn test_json_round_trip() {
        let viewport = Viewport::new(10.0, 20.0).unwrap();
        let drawing = Drawing::new(
            &viewport,
            &[Polyline::segment(Point3::origin(), Point3::new(1.0, 2.0, 0.0))],
        );
        let json = drawing.to_json().unwrap();
        let parsed: Drawing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, drawing);
        assert!(json.contains("\"width\": 10.0"));
    }

    #[test]
    fn test_write_json_file() {
        let path = std::env::temp_dir().join(format!("fresco-json-{}.json", std::process::id()));
        let viewport = Viewport::new(10.0, 10.0).unwrap();
        write_json(&path, &viewport, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let parsed: Drawing = serde_json::from_str(&text).unwrap();
        assert!(parsed.paths.is_empty());
    }
}
