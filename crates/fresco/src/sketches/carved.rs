//! Boolean-carved blocks standing on a hexagonal plinth.

use std::f64::consts::TAU;

use fresco_math::{Matrix4, Point2, Point3, Vec3};
use fresco_scene::{BooleanShape, Camera, Cube, Polygon, Scene};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();

    let hexagon: Vec<Point2> = (0..6)
        .map(|i| {
            let a = TAU * i as f64 / 6.0;
            Point2::new(3.0 * a.cos(), 3.0 * a.sin())
        })
        .collect();
    let turn = Matrix4::rotate(&Vec3::z(), rng.random_range(0.0..TAU / 6.0));
    scene.register_shape3d(Polygon::from_contour(&hexagon, &turn)?);

    let notch = rng.random_range(0.6..1.2);
    scene.register_shape3d(BooleanShape::difference(
        Cube::new(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 2.0)),
        Cube::new(
            Point3::new(1.0 - notch, -1.0 - notch, 2.0 - notch),
            Point3::new(1.0 + notch, -1.0 + notch, 2.0 + notch),
        ),
    ));

    let shift = rng.random_range(0.2..0.5);
    scene.register_shape3d(BooleanShape::intersection(
        Cube::new(Point3::new(-2.4, 0.8, 0.0), Point3::new(-1.2, 2.0, 1.2)),
        Cube::new(
            Point3::new(-2.4 + shift, 0.8 - shift, shift),
            Point3::new(-1.2 + shift, 2.0 - shift, 1.2 + shift),
        ),
    ));

    let camera = Camera::perspective(
        Point3::new(5.0, -6.0, 4.5),
        Point3::new(0.0, 0.0, 0.8),
        Vec3::z(),
        45f64.to_radians(),
        0.1,
        100.0,
    );
    Ok((scene, camera))
}
