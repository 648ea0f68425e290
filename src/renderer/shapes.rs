//! Shape generation for vector outlines
//!
//! Everything is returned in world coordinates so a surface only has to
//! stroke points, never transform them.

use glam::Vec2;

use crate::sim::{Asteroid, Ship};

/// Extra length of the thrust flame past the tail
const FLAME_LENGTH: f32 = 8.0;

/// Rotate a local offset by `angle` and move it to `origin`
#[inline]
fn place(origin: Vec2, angle: f32, local: Vec2) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(local)
}

/// Triangular hull: nose forward, two tail corners
pub fn ship_hull(ship: &Ship) -> [Vec2; 3] {
    let r = ship.radius;
    [
        Vec2::new(r, 0.0),
        Vec2::new(-r * 0.8, -r * 0.6),
        Vec2::new(-r * 0.8, r * 0.6),
    ]
    .map(|p| place(ship.pos, ship.angle, p))
}

/// Flame line drawn behind the tail while thrusting
pub fn thrust_flame(ship: &Ship) -> [Vec2; 2] {
    let r = ship.radius;
    [Vec2::new(-r * 0.8, 0.0), Vec2::new(-r - FLAME_LENGTH, 0.0)]
        .map(|p| place(ship.pos, ship.angle, p))
}

/// Asteroid outline (asteroids do not rotate)
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    asteroid.points().iter().map(|&p| asteroid.pos + p).collect()
}
