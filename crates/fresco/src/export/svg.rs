//! SVG export for plotter output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fresco_math::Point3;
use fresco_scene::{Polyline, Viewport};
use quick_xml::escape::escape;

use crate::settings::RenderSettings;

/// SVG document builder.
///
/// Accumulates rendered polylines and writes them as unfilled
/// `<polyline>` elements.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    background: String,
    stroke_width: f64,
    paths: Vec<Polyline>,
}

impl SvgDocument {
    /// Create an empty document covering `viewport`.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            background: String::new(),
            stroke_width: 1.0,
            paths: Vec::new(),
        }
    }

    /// Create an empty document styled by `settings`.
    pub fn from_settings(viewport: &Viewport, settings: &RenderSettings) -> Self {
        Self {
            background: settings.background.clone(),
            stroke_width: settings.stroke_width,
            ..Self::new(viewport)
        }
    }

    /// Fill the background with a CSS color; empty for none.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Add rendered polylines.
    pub fn add_paths(&mut self, paths: impl IntoIterator<Item = Polyline>) {
        self.paths.extend(paths);
    }

    /// Number of polylines in the document.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if the document has no polylines.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Centered pixel coordinates to SVG user space.
    fn to_svg(&self, p: &Point3) -> (f64, f64) {
        (self.width / 2.0 - p.x, self.height / 2.0 + p.y)
    }

    /// Render the document to a string.
    pub fn to_svg_string(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        if !self.background.is_empty() {
            svg.push_str(&format!(
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                escape(self.background.as_str())
            ));
            svg.push('\n');
        }
        svg.push_str(r#"<g fill="none" stroke-linecap="round" stroke-linejoin="round">"#);
        svg.push('\n');
        for path in &self.paths {
            if path.len() < 2 {
                continue;
            }
            let points: Vec<String> = path
                .points
                .iter()
                .map(|p| {
                    let (x, y) = self.to_svg(p);
                    format!("{:.3},{:.3}", x, y)
                })
                .collect();
            let [r, g, b] = path.stroke.color;
            svg.push_str(&format!(
                r#"<polyline points="{}" stroke="rgb({},{},{})" stroke-width="{:.3}"/>"#,
                points.join(" "),
                r,
                g,
                b,
                path.stroke.weight * self.stroke_width
            ));
            svg.push('\n');
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }

    /// Write the document to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.to_svg_string().as_bytes())
    }

    /// Export to an SVG file.
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_scene::Stroke;

    fn viewport() -> Viewport {
        Viewport::new(200.0, 100.0).unwrap()
    }

    #[test]
    fn test_maps_centered_pixels_to_top_left_origin() {
        let mut doc = SvgDocument::new(&viewport());
        // Clip-space (1, 1) lands at pixel (-100, -50): the top right corner.
        doc.add_paths([Polyline::segment(
            Point3::new(-100.0, -50.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        )]);
        let svg = doc.to_svg_string();
        assert!(svg.contains(r#"points="200.000,0.000 100.000,50.000""#), "{svg}");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_stroke_and_background() {
        let settings = RenderSettings {
            stroke_width: 2.0,
            ..Default::default()
        };
        let mut doc = SvgDocument::from_settings(&viewport(), &settings);
        doc.add_paths([Polyline::segment(Point3::origin(), Point3::new(1.0, 1.0, 0.0))
            .with_stroke(Stroke {
                color: [255, 0, 10],
                weight: 0.5,
            })]);
        let svg = doc.to_svg_string();
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r#"stroke="rgb(255,0,10)" stroke-width="1.000""#), "{svg}");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_skips_degenerate_paths() {
        let mut doc = SvgDocument::new(&viewport()).with_background("black");
        doc.add_paths([Polyline::new(vec![Point3::origin()])]);
        let svg = doc.to_svg_string();
        assert!(!svg.contains("<polyline"));
        assert!(svg.contains(r#"fill="black""#));
    }

    #[test]
    fn test_background_is_escaped() {
        let doc = SvgDocument::new(&viewport()).with_background(r#"red" onload="x"#);
        let svg = doc.to_svg_string();
        assert!(svg.contains(r#"fill="red&quot; onload=&quot;x""#), "{svg}");
        assert!(!svg.contains(r#"onload="x"#));
    }

    #[test]
    fn test_write_to_matches_string() {
        let mut doc = SvgDocument::new(&viewport());
        doc.add_paths([Polyline::segment(Point3::origin(), Point3::new(5.0, 5.0, 0.0))]);
        let mut buf = Vec::new();
        doc.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), doc.to_svg_string());
    }

    #[test]
    fn test_export_file() {
        let path = std::env::temp_dir().join(format!("fresco-svg-{}.svg", std::process::id()));
        let mut doc = SvgDocument::new(&viewport());
        doc.add_paths([Polyline::segment(Point3::origin(), Point3::new(5.0, 5.0, 0.0))]);
        doc.export(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.contains("<polyline"));
    }
}
