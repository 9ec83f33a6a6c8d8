//! Occluder shapes.
//!
//! Every shape can report its bounding box, the distance at which a ray
//! first meets it, the outline paths to draw for it, and whether it
//! contains a point. [`Shape3D`] is the closed set of variants the
//! scene and the [`Tree`](crate::Tree) work with.

mod boolean;
mod cube;
mod polygon;
mod triangle;

pub use boolean::{BooleanOp, BooleanShape, MAX_PEEL_STEPS};
pub use cube::Cube;
pub use polygon::Polygon;
pub use triangle::{Tri3D, TriangleHit};

use fresco_math::Point3;

use crate::aabb::Aabb3;
use crate::path::Polyline;
use crate::ray::Ray;

/// An occluding 3D shape.
#[derive(Debug, Clone)]
pub enum Shape3D {
    /// Solid axis-aligned box.
    Cube(Cube),
    /// Single triangle.
    Triangle(Tri3D),
    /// Flat, closed, simple polygon.
    Polygon(Polygon),
    /// Intersection or difference of two shapes.
    Boolean(BooleanShape),
}

impl Shape3D {
    /// Axis-aligned bounds of the shape.
    pub fn bounding_box(&self) -> Aabb3 {
        match self {
            Shape3D::Cube(c) => c.bounds,
            Shape3D::Triangle(t) => t.bounding_box(),
            Shape3D::Polygon(p) => p.bounding_box(),
            Shape3D::Boolean(b) => b.bounding_box(),
        }
    }

    /// Distance along `ray` to the first surface crossing, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape3D::Cube(c) => c.intersect(ray),
            Shape3D::Triangle(t) => t.intersect(ray),
            Shape3D::Polygon(p) => p.intersect(ray),
            Shape3D::Boolean(b) => b.intersect(ray),
        }
    }

    /// Outline paths to draw for this shape.
    pub fn paths(&self) -> Vec<Polyline> {
        match self {
            Shape3D::Cube(c) => c.paths(),
            Shape3D::Triangle(t) => t.paths(),
            Shape3D::Polygon(p) => p.paths(),
            Shape3D::Boolean(b) => b.paths(),
        }
    }

    /// True if `p` is inside the shape, with the surface grown by
    /// `tolerance` (shrunk when negative).
    pub fn contains(&self, p: &Point3, tolerance: f64) -> bool {
        match self {
            Shape3D::Cube(c) => c.contains(p, tolerance),
            Shape3D::Triangle(t) => t.contains(p, tolerance),
            Shape3D::Polygon(poly) => poly.contains(p, tolerance),
            Shape3D::Boolean(b) => b.contains(p, tolerance),
        }
    }
}

impl From<Cube> for Shape3D {
    fn from(c: Cube) -> Self {
        Shape3D::Cube(c)
    }
}

impl From<Tri3D> for Shape3D {
    fn from(t: Tri3D) -> Self {
        Shape3D::Triangle(t)
    }
}

impl From<Polygon> for Shape3D {
    fn from(p: Polygon) -> Self {
        Shape3D::Polygon(p)
    }
}

impl From<BooleanShape> for Shape3D {
    fn from(b: BooleanShape) -> Self {
        Shape3D::Boolean(b)
    }
}
