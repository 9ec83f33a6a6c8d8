//! A grid of pyramids, each built from four triangles.

use fresco_math::{Point3, Vec3};
use fresco_scene::{Camera, Scene, Tri3D};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;

const ROWS: usize = 8;
const SPACING: f64 = 2.2;

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();
    for i in 0..ROWS {
        for j in 0..ROWS {
            let side = rng.random_range(1.5..2.0);
            let height = rng.random_range(0.8..2.5);
            let x = i as f64 * SPACING;
            let y = j as f64 * SPACING;
            let base = [
                Point3::new(x, y, 0.0),
                Point3::new(x + side, y, 0.0),
                Point3::new(x + side, y + side, 0.0),
                Point3::new(x, y + side, 0.0),
            ];
            let apex = Point3::new(x + side / 2.0, y + side / 2.0, height);
            for k in 0..4 {
                scene.register_shape3d(Tri3D::new(base[k], base[(k + 1) % 4], apex));
            }
        }
    }

    let camera = Camera::perspective(
        Point3::new(-5.0, -7.0, 8.0),
        Point3::new(8.0, 8.0, 0.0),
        Vec3::z(),
        45f64.to_radians(),
        0.1,
        200.0,
    );
    Ok((scene, camera))
}
