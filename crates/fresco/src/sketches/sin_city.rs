//! Towers whose heights follow a sine field.

use std::f64::consts::TAU;

use fresco_math::{Point3, Vec3};
use fresco_scene::{Camera, Cube, Scene};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;

const ROWS: usize = 16;
const FOOTPRINT: f64 = 0.7;

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let phase = rng.random_range(0.0..TAU);
    let mut scene = Scene::new();
    for i in 0..ROWS {
        for j in 0..ROWS {
            let (x, y) = (i as f64, j as f64);
            let wave = (x * 0.6 + phase).sin() * (y * 0.4 + phase).cos();
            let height = (1.5 + 1.2 * wave + rng.random_range(0.0..0.3)).max(0.2);
            let tower = Cube::new(
                Point3::new(x, y, 0.0),
                Point3::new(x + FOOTPRINT, y + FOOTPRINT, height),
            );
            if height > 2.0 {
                scene.register_shape3d(tower.with_stripes(3));
            } else {
                scene.register_shape3d(tower);
            }
        }
    }

    let camera = Camera::perspective(
        Point3::new(-6.0, -9.0, 9.0),
        Point3::new(8.0, 8.0, 0.0),
        Vec3::z(),
        40f64.to_radians(),
        0.1,
        200.0,
    );
    Ok((scene, camera))
}
