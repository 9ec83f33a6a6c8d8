//! City blocks under a moon.
//!
//! Towers sit on a jittered grid; some are hatched. The moon is an overlay
//! circle behind the city, so towers in front of it cut its outline.

use fresco_math::{Point3, Vec3};
use fresco_scene::{Camera, Cube, Scene};
use rand::rngs::StdRng;
use rand::Rng;

use super::circle;
use crate::error::Result;

const BLOCKS: usize = 10;
const SPACING: f64 = 2.0;

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();
    for i in 0..BLOCKS {
        for j in 0..BLOCKS {
            let x = i as f64 * SPACING + rng.random_range(-0.2..0.2);
            let y = j as f64 * SPACING + rng.random_range(-0.2..0.2);
            let w = rng.random_range(0.8..1.6);
            let d = rng.random_range(0.8..1.6);
            let h = rng.random_range(0.5..4.0);
            let tower = Cube::new(Point3::new(x, y, 0.0), Point3::new(x + w, y + d, h));
            if rng.random_bool(0.3) {
                scene.register_shape3d(tower.with_stripes((h * 3.0) as usize));
            } else {
                scene.register_shape3d(tower);
            }
        }
    }

    let eye = Point3::new(-6.0, -8.0, 10.0);
    let center = Point3::new(10.0, 10.0, 0.0);
    let forward = (center - eye).normalize();
    let right = forward.cross(&Vec3::z()).normalize();
    let up = right.cross(&forward);
    let moon = center + forward * 12.0 + up * 6.0 + right * rng.random_range(-4.0..4.0);
    scene.register_shape2d(circle(moon, right, up, 2.0, 120));

    let camera = Camera::perspective(eye, center, Vec3::z(), 45f64.to_radians(), 0.1, 200.0);
    Ok((scene, camera))
}
