//! Asteroids Arcade - A wrap-around space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, lives, levels)
//! - `renderer`: Drawing-surface abstraction and frame drawing
//! - `settings`: Plane size, seed and display preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Default plane dimensions (overridden by the canvas size on web)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Nominal frame duration for drivers without a display clock (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 0.12;
    /// Velocity multiplier applied every frame
    pub const SHIP_DAMPING: f32 = 0.99;
    /// Heading change per key-down event (radians)
    pub const SHIP_TURN_STEP: f32 = 0.13;
    pub const SHIP_START_LIVES: u32 = 3;
    /// Invulnerability granted on reset (frames)
    pub const SHIP_INVULNERABLE_FRAMES: u32 = 120;
    /// Live bullets allowed before `shoot` becomes a no-op
    pub const MAX_BULLETS: usize = 6;
    /// One hyperspace jump in this many ends in disaster
    pub const HYPERSPACE_MISHAP_ODDS: f64 = 1.0 / 6.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 6.0;
    pub const BULLET_LIFETIME: u32 = 60;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_RADIUS: f32 = 32.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 50.0;
    pub const ASTEROID_MAX_SPEED: f32 = 2.0;
    /// Asteroids larger than this split in two when shot
    pub const ASTEROID_SPLIT_RADIUS: f32 = 22.0;
    pub const ASTEROID_SPLIT_DIVISOR: f32 = 1.7;
    pub const FRAGMENT_MIN_SPEED: f32 = 1.0;
    pub const FRAGMENT_MAX_SPEED: f32 = 2.0;
    /// Polygon vertex count range (upper bound exclusive)
    pub const ASTEROID_MIN_VERTS: usize = 8;
    pub const ASTEROID_MAX_VERTS: usize = 14;
    /// Per-vertex radial jitter range
    pub const ASTEROID_JAGGEDNESS_MIN: f32 = 0.8;
    pub const ASTEROID_JAGGEDNESS_MAX: f32 = 1.2;

    /// Points per destroyed asteroid, indexed by generation - 1
    pub const SCORE_TABLE: [u64; 3] = [20, 50, 100];
    /// Points for generations beyond the table
    pub const SCORE_FALLBACK: u64 = 100;
    pub const EXTRA_LIFE_STEP: i64 = 10_000;

    /// Asteroids in the first level
    pub const FIRST_LEVEL_ASTEROIDS: usize = 4;
    /// Later levels spawn this many plus the level number
    pub const LEVEL_ASTEROID_BASE: usize = 3;

    /// Real-time delays for deferred transitions (ms)
    pub const LOSE_LIFE_DELAY_MS: f64 = 1000.0;
    pub const NEXT_LEVEL_DELAY_MS: f64 = 1100.0;
    pub const INSTRUCTIONS_DELAY_MS: f64 = 1200.0;
}

/// Wrap a coordinate into [0, max) (toroidal plane)
#[inline]
pub fn wrap(p: f32, max: f32) -> f32 {
    let wrapped = p.rem_euclid(max);
    // rem_euclid can round up to exactly `max` for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Wrap a position into the plane on both axes
#[inline]
pub fn wrap_position(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap(pos.x, bounds.x), wrap(pos.y, bounds.y))
}

/// Straight-line distance between two points (edges are not considered)
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Uniform random value in [min, max)
#[inline]
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
