//! Scene registration and the hidden-line render pipeline.

use std::sync::{Arc, OnceLock};

use fresco_math::{Matrix4, Point3};
use tracing::{debug, trace};

use crate::aabb::Aabb3;
use crate::bvh::Tree;
use crate::camera::{Camera, Viewport};
use crate::error::Result;
use crate::path::Polyline;
use crate::ray::{Hit, Ray};
use crate::shape::Shape3D;

/// The canonical clip cube `[-1, 1]^3`.
pub fn clip_box() -> Aabb3 {
    Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
}

/// Tuning for a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Maximum world-space spacing between visibility samples along a
    /// path. Zero or less tests only the original vertices.
    pub subdivision_step: f64,
    /// When set, visible runs are simplified in clip space with this
    /// tolerance before being mapped to pixels.
    pub simplify_tolerance: Option<f64>,
}

impl RenderOptions {
    /// Options with the given subdivision step and no simplification.
    pub fn new(subdivision_step: f64) -> Self {
        Self {
            subdivision_step,
            simplify_tolerance: None,
        }
    }

    /// Enable clip-space simplification.
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = Some(tolerance);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    shape: Arc<Shape3D>,
    /// Whether the shape's own outline is drawn.
    outlined: bool,
}

/// Occluders, overlay paths and a lazily built [`Tree`] over the occluders.
///
/// The tree is built on first use and dropped whenever an occluder is
/// registered, so rendering only needs `&self`.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entries: Vec<Entry>,
    overlays: Vec<Polyline>,
    tree: OnceLock<Tree>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an occluder whose outline is also drawn.
    pub fn register_shape3d(&mut self, shape: impl Into<Shape3D>) {
        self.push_entry(shape.into(), true);
    }

    /// Register an occluder that hides other paths but is not drawn.
    pub fn register_occluder(&mut self, shape: impl Into<Shape3D>) {
        self.push_entry(shape.into(), false);
    }

    /// Register a path that is drawn and occluded but occludes nothing.
    pub fn register_shape2d(&mut self, path: Polyline) {
        self.overlays.push(path);
    }

    fn push_entry(&mut self, shape: Shape3D, outlined: bool) {
        self.entries.push(Entry {
            shape: Arc::new(shape),
            outlined,
        });
        if self.tree.take().is_some() {
            debug!(shapes = self.entries.len(), "scene changed, bvh invalidated");
        }
    }

    /// Number of registered occluders.
    pub fn shape_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of registered overlay paths.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// True once the tree has been built for the current occluders.
    pub fn is_built(&self) -> bool {
        self.tree.get().is_some()
    }

    /// The tree over the current occluders, building it if needed.
    pub fn build(&self) -> &Tree {
        self.tree.get_or_init(|| {
            Tree::new(self.entries.iter().map(|e| Arc::clone(&e.shape)).collect())
        })
    }

    /// Nearest occluder hit along `ray`.
    pub fn intersect(&self, ray: &Ray) -> Hit<'_> {
        self.build().intersect(ray)
    }

    /// True if nothing blocks the line of sight from `point` to `eye`.
    pub fn visible(&self, eye: &Point3, point: &Point3) -> bool {
        let to_eye = eye - point;
        let distance_squared = to_eye.norm_squared();
        if distance_squared == 0.0 {
            return true;
        }
        let hit = self.intersect(&Ray::new(*point, to_eye));
        hit.t * hit.t >= distance_squared
    }

    /// Every path a render considers: drawn occluder outlines, then
    /// overlays.
    pub fn paths(&self) -> Vec<Polyline> {
        self.entries
            .iter()
            .filter(|e| e.outlined)
            .flat_map(|e| e.shape.paths())
            .chain(self.overlays.iter().cloned())
            .collect()
    }

    /// Render visible path runs in pixel space, subdividing paths to
    /// `step` before testing visibility.
    pub fn render(&self, camera: &Camera, viewport: &Viewport, step: f64) -> Result<Vec<Polyline>> {
        self.render_with_options(camera, viewport, &RenderOptions::new(step))
    }

    /// [`render`](Self::render) with full options.
    pub fn render_with_options(
        &self,
        camera: &Camera,
        viewport: &Viewport,
        options: &RenderOptions,
    ) -> Result<Vec<Polyline>> {
        let matrix = camera.matrix(viewport)?;
        Ok(self.render_with_matrix(&matrix, &camera.eye, viewport, options))
    }

    /// Render with a precomposed world to clip transform. `eye` is the
    /// point visibility rays are cast towards.
    pub fn render_with_matrix(
        &self,
        matrix: &Matrix4,
        eye: &Point3,
        viewport: &Viewport,
        options: &RenderOptions,
    ) -> Vec<Polyline> {
        let clip = clip_box();
        let mut paths = self.paths();
        if options.subdivision_step > 0.0 {
            paths = paths
                .iter()
                .map(|p| p.chop(options.subdivision_step))
                .collect();
        }
        trace!(
            paths = paths.len(),
            vertices = paths.iter().map(Polyline::len).sum::<usize>(),
            "collected paths"
        );

        let mut result = Vec::new();
        for path in &paths {
            let runs = path.filter(|v| {
                let c = matrix.apply(v);
                (clip.contains(&c) && self.visible(eye, v)).then_some(c)
            });
            for run in runs {
                let run = match options.simplify_tolerance {
                    Some(tolerance) => run.simplify(tolerance),
                    None => run,
                };
                result.push(Polyline {
                    points: run.points.iter().map(|p| viewport.to_pixels(p)).collect(),
                    stroke: run.stroke,
                });
            }
        }
        trace!(runs = result.len(), "filtered visible runs");
        result
    }
}
