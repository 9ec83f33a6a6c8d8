//! Flat polygons lifted into 3D.
//!
//! A polygon keeps its 3D contour plus a plane frame (origin, two in-plane
//! axes, unit normal). Ray tests run against an ear-clipped triangulation
//! that is built the first time the polygon is hit. Containment is an
//! even-odd test on the contour projected into the plane frame.
//!
//! Contours are assumed closed, planar and simple. Self-intersecting
//! input gives wrong occlusion but never panics.

use std::sync::OnceLock;

use fresco_math::{Matrix4, Point2, Point3, Vec3};
use tracing::warn;

use crate::aabb::Aabb3;
use crate::error::{Result, SceneError};
use crate::path::Polyline;
use crate::ray::Ray;
use crate::shape::Tri3D;

/// Minimum Newell normal length for a contour to define a plane.
const MIN_NORMAL_LENGTH: f64 = 1e-12;

/// A closed planar polygon occluder.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point3>,
    /// Contour in plane coordinates, parallel to `vertices`.
    contour: Vec<Point2>,
    origin: Point3,
    u_axis: Vec3,
    v_axis: Vec3,
    normal: Vec3,
    bounds: Aabb3,
    triangles: OnceLock<Vec<Tri3D>>,
}

impl Polygon {
    /// Create a polygon from a planar contour.
    ///
    /// A repeated closing vertex is dropped. Fails with
    /// [`SceneError::DegeneratePolygon`] when fewer than three vertices
    /// remain or the vertices are collinear.
    pub fn new(mut vertices: Vec<Point3>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(SceneError::DegeneratePolygon(format!(
                "{} vertices, need at least 3",
                vertices.len()
            )));
        }

        let newell = newell_normal(&vertices);
        let length = newell.norm();
        if length < MIN_NORMAL_LENGTH {
            return Err(SceneError::DegeneratePolygon(
                "vertices do not span a plane".into(),
            ));
        }
        let normal = newell / length;

        let origin = vertices[0];
        let (u_axis, v_axis) = plane_basis(&normal);
        let contour = vertices
            .iter()
            .map(|p| {
                let d = p - origin;
                Point2::new(d.dot(&u_axis), d.dot(&v_axis))
            })
            .collect();

        Ok(Self {
            bounds: Aabb3::for_points(vertices.iter()),
            vertices,
            contour,
            origin,
            u_axis,
            v_axis,
            normal,
            triangles: OnceLock::new(),
        })
    }

    /// Lift a 2D contour from the XY plane through `placement`.
    pub fn from_contour(contour: &[Point2], placement: &Matrix4) -> Result<Self> {
        Self::new(
            contour
                .iter()
                .map(|p| placement.position_mul(&Point3::new(p.x, p.y, 0.0)))
                .collect(),
        )
    }

    /// Four-sided polygon through `a`, `b`, `c`, `d` in order.
    pub fn quad(a: Point3, b: Point3, c: Point3, d: Point3) -> Result<Self> {
        Self::new(vec![a, b, c, d])
    }

    /// Contour vertices, without a closing repeat.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Unit plane normal; follows the contour winding.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Bounding box of the contour. Flat along the normal for
    /// axis-aligned polygons.
    pub fn bounding_box(&self) -> Aabb3 {
        self.bounds
    }

    /// Triangles covering the polygon, built on first use.
    pub fn triangles(&self) -> &[Tri3D] {
        self.triangles.get_or_init(|| self.triangulate())
    }

    /// Nearest hit over the triangulation.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.triangles()
            .iter()
            .filter_map(|tri| tri.intersect(ray))
            .min_by(f64::total_cmp)
    }

    /// True if `p` lies within `tolerance` of the plane and inside the
    /// contour. A negative tolerance never matches: the polygon has no
    /// interior volume to shrink into.
    pub fn contains(&self, p: &Point3, tolerance: f64) -> bool {
        let d = p - self.origin;
        if d.dot(&self.normal).abs() > tolerance {
            return false;
        }
        let q = Point2::new(d.dot(&self.u_axis), d.dot(&self.v_axis));
        even_odd(&self.contour, &q)
    }

    /// The closed outline.
    pub fn paths(&self) -> Vec<Polyline> {
        vec![Polyline::closed(self.vertices.clone())]
    }

    fn triangulate(&self) -> Vec<Tri3D> {
        let coords: Vec<f64> = self.contour.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = match earcutr::earcut(&coords, &[], 2) {
            Ok(indices) if !indices.is_empty() => indices,
            Ok(_) => {
                warn!(vertices = self.vertices.len(), "ear clipping produced no triangles, using fan");
                return self.fan();
            }
            Err(e) => {
                warn!(vertices = self.vertices.len(), error = ?e, "ear clipping failed, using fan");
                return self.fan();
            }
        };
        indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < self.vertices.len()))
            .map(|tri| {
                Tri3D::new(
                    self.vertices[tri[0]],
                    self.vertices[tri[1]],
                    self.vertices[tri[2]],
                )
            })
            .collect()
    }

    fn fan(&self) -> Vec<Tri3D> {
        let first = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|w| Tri3D::new(first, w[0], w[1]))
            .collect()
    }
}

/// Newell's method: robust normal for any planar polygon, unnormalized.
fn newell_normal(points: &[Point3]) -> Vec3 {
    let mut n = Vec3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}

/// Two in-plane axes, crossing the normal with the world axis least
/// parallel to it.
fn plane_basis(normal: &Vec3) -> (Vec3, Vec3) {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let reference = if ax <= ay && ax <= az {
        Vec3::x()
    } else if ay <= az {
        Vec3::y()
    } else {
        Vec3::z()
    };
    let u = normal.cross(&reference).normalize();
    let v = normal.cross(&u).normalize();
    (u, v)
}

fn even_odd(contour: &[Point2], p: &Point2) -> bool {
    let mut inside = false;
    let mut j = contour.len() - 1;
    for i in 0..contour.len() {
        let (a, b) = (contour[i], contour[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
