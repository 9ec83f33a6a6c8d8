//! Solid axis-aligned cubes.

use fresco_math::{Point3, Vec3};

use crate::aabb::Aabb3;
use crate::path::Polyline;
use crate::ray::Ray;

/// A solid box with an edge outline and optional vertical hatching.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Extent of the cube.
    pub bounds: Aabb3,
    /// Number of hatch intervals on each side face; 0 draws edges only.
    pub stripes: usize,
}

impl Cube {
    /// Cube spanning two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            bounds: Aabb3::new(a, b),
            stripes: 0,
        }
    }

    /// Cube of the given edge lengths centered on `center`.
    pub fn centered(center: Point3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// Hatch each side face with `stripes + 1` vertical lines.
    pub fn with_stripes(mut self, stripes: usize) -> Self {
        self.stripes = stripes;
        self
    }

    /// Distance to the cube surface; see [`Aabb3::ray_hit`].
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.bounds.ray_hit(ray)
    }

    /// Containment with the faces offset by `tolerance`.
    pub fn contains(&self, p: &Point3, tolerance: f64) -> bool {
        self.bounds.contains_with_tolerance(p, tolerance)
    }

    /// The twelve edges, followed by hatch lines when enabled.
    pub fn paths(&self) -> Vec<Polyline> {
        let mut paths = self.bounds.outline();
        if self.stripes == 0 {
            return paths;
        }
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        for i in 0..=self.stripes {
            let p = i as f64 / self.stripes as f64;
            let x = lo.x + (hi.x - lo.x) * p;
            let y = lo.y + (hi.y - lo.y) * p;
            paths.push(Polyline::segment(
                Point3::new(x, lo.y, lo.z),
                Point3::new(x, lo.y, hi.z),
            ));
            paths.push(Polyline::segment(
                Point3::new(x, hi.y, lo.z),
                Point3::new(x, hi.y, hi.z),
            ));
            paths.push(Polyline::segment(
                Point3::new(lo.x, y, lo.z),
                Point3::new(lo.x, y, hi.z),
            ));
            paths.push(Polyline::segment(
                Point3::new(hi.x, y, lo.z),
                Point3::new(hi.x, y, hi.z),
            ));
        }
        paths
    }
}
