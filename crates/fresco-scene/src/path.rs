//! Polylines: the paths that get subdivided, filtered and drawn.

use fresco_math::{Matrix4, Point3};

use crate::aabb::Aabb3;

/// Drawing style carried alongside a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// RGB stroke color.
    pub color: [u8; 3],
    /// Stroke width in pixels.
    pub weight: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            weight: 1.0,
        }
    }
}

/// An ordered sequence of vertices drawn as connected line segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    /// Vertices in drawing order.
    pub points: Vec<Point3>,
    /// Drawing style.
    pub stroke: Stroke,
}

impl Polyline {
    /// Create a polyline with the default stroke.
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            stroke: Stroke::default(),
        }
    }

    /// A single line segment.
    pub fn segment(a: Point3, b: Point3) -> Self {
        Self::new(vec![a, b])
    }

    /// A closed loop: the first vertex is repeated at the end.
    pub fn closed(mut points: Vec<Point3>) -> Self {
        if let Some(&first) = points.first() {
            if points.len() > 1 && points.last() != Some(&first) {
                points.push(first);
            }
        }
        Self::new(points)
    }

    /// Replace the stroke.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the polyline has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Bounding box of the vertices.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::for_points(self.points.iter())
    }

    /// Subdivide every segment so that no piece is longer than `step`.
    ///
    /// Original vertices are kept; new ones are inserted at multiples of
    /// `step` from each segment start. A non-positive step returns a copy.
    pub fn chop(&self, step: f64) -> Self {
        if step.is_nan() || step <= 0.0 || self.points.len() < 2 {
            return self.clone();
        }
        let mut points = Vec::with_capacity(self.points.len());
        points.push(self.points[0]);
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            let v = b - a;
            let len = v.norm();
            let mut d = step;
            while d < len {
                points.push(a + v * (d / len));
                d += step;
            }
            points.push(b);
        }
        Self {
            points,
            stroke: self.stroke,
        }
    }

    /// Map every vertex through `f`, splitting the path wherever `f`
    /// rejects a vertex.
    ///
    /// Each maximal run of accepted vertices becomes its own polyline;
    /// runs of a single vertex are dropped.
    pub fn filter<F>(&self, mut f: F) -> Vec<Polyline>
    where
        F: FnMut(&Point3) -> Option<Point3>,
    {
        let mut result = Vec::new();
        let mut run: Vec<Point3> = Vec::new();
        for p in &self.points {
            match f(p) {
                Some(q) => run.push(q),
                None => {
                    if run.len() > 1 {
                        result.push(Self {
                            points: std::mem::take(&mut run),
                            stroke: self.stroke,
                        });
                    } else {
                        run.clear();
                    }
                }
            }
        }
        if run.len() > 1 {
            result.push(Self {
                points: run,
                stroke: self.stroke,
            });
        }
        result
    }

    /// Apply a transform (with perspective divide) to every vertex.
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        Self {
            points: self.points.iter().map(|p| matrix.apply(p)).collect(),
            stroke: self.stroke,
        }
    }

    /// Drop vertices that deviate less than `tolerance` from the line
    /// through their neighbours (Ramer-Douglas-Peucker).
    pub fn simplify(&self, tolerance: f64) -> Self {
        if self.points.len() < 3 {
            return self.clone();
        }
        let mut keep = vec![false; self.points.len()];
        keep[0] = true;
        keep[self.points.len() - 1] = true;
        simplify_range(&self.points, 0, self.points.len() - 1, tolerance, &mut keep);
        Self {
            points: self
                .points
                .iter()
                .zip(&keep)
                .filter_map(|(p, &k)| k.then_some(*p))
                .collect(),
            stroke: self.stroke,
        }
    }
}

fn simplify_range(points: &[Point3], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let (a, b) = (points[first], points[last]);
    let mut worst = first;
    let mut worst_distance = -1.0;
    for (i, p) in points.iter().enumerate().take(last).skip(first + 1) {
        let d = segment_distance(p, &a, &b);
        if d > worst_distance {
            worst_distance = d;
            worst = i;
        }
    }
    if worst_distance > tolerance {
        keep[worst] = true;
        simplify_range(points, first, worst, tolerance, keep);
        simplify_range(points, worst, last, tolerance, keep);
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
