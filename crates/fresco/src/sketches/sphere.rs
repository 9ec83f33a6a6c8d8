//! A globe of latitude and longitude lines.
//!
//! The lines are overlays; a slightly smaller triangulated sphere hides
//! the far side.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use fresco_math::{Matrix4, Point3, Vec3};
use fresco_scene::{Camera, Polyline, Scene, Tri3D};
use rand::rngs::StdRng;
use rand::Rng;

use super::circle;
use crate::error::Result;

const LINE_STEP_DEGREES: i32 = 15;
const OCCLUDER_RADIUS: f64 = 0.97;
const SLICES: usize = 24;
const STACKS: usize = 16;

fn on_sphere(radius: f64, lat: f64, lon: f64) -> Point3 {
    Point3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
    )
}

pub(super) fn build(rng: &mut StdRng) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();

    for s in 0..STACKS {
        let lat0 = -FRAC_PI_2 + PI * s as f64 / STACKS as f64;
        let lat1 = -FRAC_PI_2 + PI * (s + 1) as f64 / STACKS as f64;
        for k in 0..SLICES {
            let lon0 = TAU * k as f64 / SLICES as f64;
            let lon1 = TAU * (k + 1) as f64 / SLICES as f64;
            let a = on_sphere(OCCLUDER_RADIUS, lat0, lon0);
            let b = on_sphere(OCCLUDER_RADIUS, lat0, lon1);
            let c = on_sphere(OCCLUDER_RADIUS, lat1, lon1);
            let d = on_sphere(OCCLUDER_RADIUS, lat1, lon0);
            // Quads touching a pole collapse to one triangle.
            if s > 0 {
                scene.register_occluder(Tri3D::new(a, b, c));
            }
            if s + 1 < STACKS {
                scene.register_occluder(Tri3D::new(a, c, d));
            }
        }
    }

    let axis = Vec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    );
    let tilt = if axis.norm() > 1e-3 {
        Matrix4::rotate(&axis, rng.random_range(0.0..0.6))
    } else {
        Matrix4::identity()
    };

    for lat in (-90 + LINE_STEP_DEGREES..90).step_by(LINE_STEP_DEGREES as usize) {
        let lat = (lat as f64).to_radians();
        let ring = circle(
            Point3::new(0.0, 0.0, lat.sin()),
            Vec3::x(),
            Vec3::y(),
            lat.cos(),
            96,
        );
        scene.register_shape2d(ring.transform(&tilt));
    }
    for lon in (0..180).step_by(LINE_STEP_DEGREES as usize) {
        let lon = (lon as f64).to_radians();
        let meridian = circle(
            Point3::origin(),
            Vec3::new(lon.cos(), lon.sin(), 0.0),
            Vec3::z(),
            1.0,
            96,
        );
        scene.register_shape2d(meridian.transform(&tilt));
    }
    scene.register_shape2d(Polyline::segment(
        tilt.apply(&Point3::new(0.0, 0.0, 1.0)),
        tilt.apply(&Point3::new(0.0, 0.0, 1.3)),
    ));

    let camera = Camera::perspective(
        Point3::new(0.0, -5.0, 2.5),
        Point3::origin(),
        Vec3::z(),
        30f64.to_radians(),
        0.1,
        100.0,
    );
    Ok((scene, camera))
}
