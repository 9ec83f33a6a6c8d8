//! Bounding volume hierarchy over scene occluders.
//!
//! The tree is a binary space partition: every split node divides space
//! with an axis-aligned plane, and shapes straddling the plane are listed
//! on both sides. Nodes with fewer than [`LEAF_SIZE`] shapes, or for which
//! no plane separates the shapes well enough, become leaves.

use std::sync::Arc;

use tracing::debug;

use crate::aabb::{Aabb3, Axis};
use crate::ray::{Hit, Ray};
use crate::shape::Shape3D;

/// Nodes with fewer shapes than this are never split.
pub const LEAF_SIZE: usize = 8;

/// A split is kept only if its larger side holds fewer than this fraction
/// of the node's shapes.
pub const SPLIT_RATIO: f64 = 0.85;

/// A node of the hierarchy. Shapes are referenced by index into the
/// owning [`Tree`].
#[derive(Debug, Clone)]
pub enum Node {
    /// Shapes tested exhaustively.
    Leaf(Vec<usize>),
    /// Plane `axis = point` dividing two subtrees.
    Split {
        /// Axis the plane is perpendicular to.
        axis: Axis,
        /// Plane position along `axis`.
        point: f64,
        /// Shapes with their minimum at or below the plane.
        left: Box<Node>,
        /// Shapes with their maximum at or above the plane.
        right: Box<Node>,
    },
}

impl Node {
    fn build(indices: Vec<usize>, boxes: &[Aabb3]) -> Self {
        if indices.len() < LEAF_SIZE {
            return Node::Leaf(indices);
        }

        let mut best_score = (indices.len() as f64 * SPLIT_RATIO) as usize;
        let mut best = None;
        for axis in Axis::ALL {
            let point = median_plane(&indices, boxes, axis);
            let (left, right) = indices.iter().fold((0, 0), |(l, r), &i| {
                let (in_left, in_right) = boxes[i].partition(axis, point);
                (l + usize::from(in_left), r + usize::from(in_right))
            });
            let score = left.max(right);
            if score < best_score {
                best_score = score;
                best = Some((axis, point));
            }
        }

        let Some((axis, point)) = best else {
            return Node::Leaf(indices);
        };
        let mut left = Vec::new();
        let mut right = Vec::new();
        for i in indices {
            let (in_left, in_right) = boxes[i].partition(axis, point);
            if in_left {
                left.push(i);
            }
            if in_right {
                right.push(i);
            }
        }
        Node::Split {
            axis,
            point,
            left: Box::new(Node::build(left, boxes)),
            right: Box::new(Node::build(right, boxes)),
        }
    }

    /// Nearest hit within this subtree. `t_min`/`t_max` bound the part of
    /// the ray inside the node; leaves test their shapes unbounded.
    fn intersect<'a>(&self, shapes: &'a [Arc<Shape3D>], ray: &Ray, t_min: f64, t_max: f64) -> Hit<'a> {
        let (axis, point, left, right) = match self {
            Node::Leaf(indices) => {
                return indices.iter().fold(Hit::NONE, |best, &i| {
                    let shape = shapes[i].as_ref();
                    match shape.intersect(ray) {
                        Some(t) => best.min(Hit::new(shape, t)),
                        None => best,
                    }
                });
            }
            Node::Split {
                axis,
                point,
                left,
                right,
            } => (*axis, *point, left, right),
        };

        let origin = axis.of(&ray.origin);
        let direction = axis.of_vec(ray.direction.as_ref());
        let t_split = (point - origin) / direction;
        let left_first = origin < point || (origin == point && direction <= 0.0);
        let (first, second) = if left_first {
            (left, right)
        } else {
            (right, left)
        };

        if t_split > t_max || t_split <= 0.0 {
            first.intersect(shapes, ray, t_min, t_max)
        } else if t_split < t_min {
            second.intersect(shapes, ray, t_min, t_max)
        } else {
            let h1 = first.intersect(shapes, ray, t_min, t_split);
            if h1.t <= t_split {
                return h1;
            }
            let h2 = second.intersect(shapes, ray, t_split, t_max.min(h1.t));
            h1.min(h2)
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Median of all box minima and maxima along `axis`.
fn median_plane(indices: &[usize], boxes: &[Aabb3], axis: Axis) -> f64 {
    let mut values: Vec<f64> = indices
        .iter()
        .flat_map(|&i| [axis.of(&boxes[i].min), axis.of(&boxes[i].max)])
        .collect();
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Spatial index answering nearest-hit ray queries over a fixed set of
/// shapes.
#[derive(Debug, Clone)]
pub struct Tree {
    shapes: Vec<Arc<Shape3D>>,
    bounds: Aabb3,
    root: Node,
}

impl Tree {
    /// Build a tree over `shapes`. An empty set gives an empty leaf.
    pub fn new(shapes: Vec<Arc<Shape3D>>) -> Self {
        let boxes: Vec<Aabb3> = shapes.iter().map(|s| s.bounding_box()).collect();
        let bounds = boxes.iter().fold(Aabb3::empty(), |acc, b| acc.union(b));
        let root = Node::build((0..shapes.len()).collect(), &boxes);
        let tree = Self {
            shapes,
            bounds,
            root,
        };
        debug!(
            shapes = tree.shapes.len(),
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "built bvh"
        );
        tree
    }

    /// Nearest hit along `ray`, or [`Hit::NONE`].
    pub fn intersect(&self, ray: &Ray) -> Hit<'_> {
        if self.shapes.is_empty() {
            return Hit::NONE;
        }
        let (t_min, t_max) = self.bounds.intersect_interval(ray);
        if t_max < t_min || t_max <= 0.0 {
            return Hit::NONE;
        }
        self.root.intersect(&self.shapes, ray, t_min, t_max)
    }

    /// Nearest hit found by testing every shape, without the hierarchy.
    pub fn brute_force(&self, ray: &Ray) -> Hit<'_> {
        self.shapes.iter().fold(Hit::NONE, |best, shape| {
            match shape.intersect(ray) {
                Some(t) => best.min(Hit::new(shape, t)),
                None => best,
            }
        })
    }

    /// Shapes in the tree.
    pub fn shapes(&self) -> &[Arc<Shape3D>] {
        &self.shapes
    }

    /// Union of all shape bounds.
    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if the tree holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of levels, counting the root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaf nodes.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Cube, Tri3D};
    use approx::assert_abs_diff_eq;
    use fresco_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_cube_at(x: f64, y: f64, z: f64) -> Arc<Shape3D> {
        Arc::new(Cube::new(Point3::new(x, y, z), Point3::new(x + 1.0, y + 1.0, z + 1.0)).into())
    }

    fn random_scene(rng: &mut StdRng, n: usize) -> Tree {
        let shapes = (0..n)
            .map(|i| {
                let c = Point3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                );
                if i % 3 == 0 {
                    let shape: Shape3D = Tri3D::new(
                        c,
                        c + Vec3::new(rng.random_range(0.2..2.0), 0.0, 0.0),
                        c + Vec3::new(0.0, rng.random_range(0.2..2.0), rng.random_range(-1.0..1.0)),
                    )
                    .into();
                    Arc::new(shape)
                } else {
                    let size = Vec3::new(
                        rng.random_range(0.1..2.0),
                        rng.random_range(0.1..2.0),
                        rng.random_range(0.1..2.0),
                    );
                    Arc::new(Cube::centered(c, size).into())
                }
            })
            .collect();
        Tree::new(shapes)
    }

    #[test]
    fn test_empty_tree() {
        let tree = Tree::new(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
        let ray = Ray::new(Point3::origin(), Vec3::x());
        assert!(!tree.intersect(&ray).is_hit());
    }

    #[test]
    fn test_small_set_is_single_leaf() {
        let shapes = (0..LEAF_SIZE - 1)
            .map(|i| unit_cube_at(i as f64 * 2.0, 0.0, 0.0))
            .collect();
        let tree = Tree::new(shapes);
        assert!(matches!(tree.root(), Node::Leaf(ids) if ids.len() == LEAF_SIZE - 1));
    }

    #[test]
    fn test_row_of_cubes_splits() {
        let shapes = (0..64).map(|i| unit_cube_at(i as f64 * 2.0, 0.0, 0.0)).collect();
        let tree = Tree::new(shapes);
        assert_eq!(tree.len(), 64);
        assert!(tree.depth() > 2);
        assert!(tree.leaf_count() >= 64 / LEAF_SIZE);
        match tree.root() {
            Node::Split { axis, .. } => assert_eq!(*axis, Axis::X),
            Node::Leaf(_) => panic!("expected split root"),
        }
    }

    #[test]
    fn test_coincident_shapes_stay_in_leaf() {
        let shapes = (0..20).map(|_| unit_cube_at(0.0, 0.0, 0.0)).collect();
        let tree = Tree::new(shapes);
        assert!(matches!(tree.root(), Node::Leaf(ids) if ids.len() == 20));
    }

    #[test]
    fn test_nearest_along_row() {
        let shapes = (0..32).map(|i| unit_cube_at(i as f64 * 2.0, 0.0, 0.0)).collect();
        let tree = Tree::new(shapes);

        let from_left = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::x());
        assert_abs_diff_eq!(tree.intersect(&from_left).t, 5.0, epsilon = 1e-12);

        let from_right = Ray::new(Point3::new(100.0, 0.5, 0.5), -Vec3::x());
        let hit = tree.intersect(&from_right);
        assert_abs_diff_eq!(hit.t, 100.0 - 63.0, epsilon = 1e-12);
        assert_eq!(hit.shape.unwrap().bounding_box().max.x, 63.0);

        let above = Ray::new(Point3::new(8.5, 10.0, 0.5), -Vec3::y());
        let hit = tree.intersect(&above);
        assert_abs_diff_eq!(hit.t, 9.0, epsilon = 1e-12);
        assert_eq!(hit.shape.unwrap().bounding_box().min.x, 8.0);

        let away = Ray::new(Point3::new(-5.0, 0.5, 0.5), -Vec3::x());
        assert!(!tree.intersect(&away).is_hit());
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = random_scene(&mut rng, 300);
        assert!(tree.depth() > 1);

        let mut hits = 0;
        for _ in 0..2000 {
            let origin = Point3::new(
                rng.random_range(-30.0..30.0),
                rng.random_range(-30.0..30.0),
                rng.random_range(-30.0..30.0),
            );
            let target = Point3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            );
            let ray = Ray::new(origin, target - origin);
            let fast = tree.intersect(&ray);
            let slow = tree.brute_force(&ray);
            assert_eq!(fast.is_hit(), slow.is_hit(), "ray {ray:?}");
            if slow.is_hit() {
                hits += 1;
                assert_abs_diff_eq!(fast.t, slow.t, epsilon = 1e-9);
            }
        }
        assert!(hits > 100);
    }
}
