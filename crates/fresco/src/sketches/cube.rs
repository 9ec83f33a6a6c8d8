//! A single hatched cube seen from a random side.

use std::f64::consts::TAU;

use fresco_math::{Point3, Vec3};
use fresco_scene::{Camera, Cube, Scene};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();
    scene.register_shape3d(
        Cube::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
            .with_stripes(rng.random_range(4..=12)),
    );

    let angle = rng.random_range(0.0..TAU);
    let camera = Camera::perspective(
        Point3::new(6.0 * angle.cos(), 4.0, 6.0 * angle.sin()),
        Point3::origin(),
        Vec3::y(),
        35f64.to_radians(),
        0.1,
        100.0,
    );
    Ok((scene, camera))
}
