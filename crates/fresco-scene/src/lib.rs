#![warn(missing_docs)]

//! Hidden-line rendering of 3D wireframes into 2D plotter paths.
//!
//! A [`Scene`] holds occluding shapes and free-standing overlay paths. At
//! render time every path is subdivided, each vertex is tested for a clear
//! line of sight to the eye through a bounding volume hierarchy, and the
//! surviving runs are projected to pixel space.
//!
//! # Architecture
//!
//! - [`Ray`] / [`Hit`] - ray value type and closest-hit result
//! - [`Aabb3`] - axis-aligned boxes and the slab intersection test
//! - [`shape`] - occluder variants ([`Cube`], [`Tri3D`], [`Polygon`], [`BooleanShape`])
//! - [`bvh`] - the [`Tree`] spatial index over occluders
//! - [`Scene`] / [`Camera`] - registration, camera composition and rendering
//!
//! # Example
//!
//! ```
//! use fresco_math::{Point3, Vec3};
//! use fresco_scene::{Camera, Cube, Scene, Viewport};
//!
//! let mut scene = Scene::new();
//! scene.register_shape3d(Cube::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)));
//!
//! let camera = Camera::perspective(
//!     Point3::new(4.0, 3.0, 6.0),
//!     Point3::origin(),
//!     Vec3::y(),
//!     50f64.to_radians(),
//!     0.1,
//!     100.0,
//! );
//! let viewport = Viewport::new(800.0, 800.0)?;
//! let paths = scene.render(&camera, &viewport, 0.05)?;
//! assert!(!paths.is_empty());
//! # Ok::<(), fresco_scene::SceneError>(())
//! ```

mod aabb;
pub mod bvh;
mod camera;
mod error;
mod path;
mod ray;
mod scene;
pub mod shape;

pub use aabb::{Aabb3, Axis, BOX_EPSILON};
pub use bvh::Tree;
pub use camera::{Camera, Projection, Viewport};
pub use error::{Result, SceneError};
pub use path::{Polyline, Stroke};
pub use ray::{Hit, Ray};
pub use scene::{clip_box, RenderOptions, Scene};
pub use shape::{BooleanOp, BooleanShape, Cube, Polygon, Shape3D, Tri3D};
