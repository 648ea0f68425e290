//! Asteroids: procedural outlines, edge spawning and fragmentation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Movable;
use crate::consts::*;
use crate::{polar_to_cartesian, rand_between, wrap_position};

/// A drifting rock. Collisions treat it as a circle of `radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius; 0 marks the rock for removal this frame
    pub radius: f32,
    /// Fragmentation depth (1 = original spawn)
    pub generation: u32,
    /// Outline offsets from `pos`, fixed at creation
    points: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with a freshly rolled outline
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        radius: f32,
        vel: Vec2,
        generation: u32,
    ) -> Self {
        let verts = rng.random_range(ASTEROID_MIN_VERTS..ASTEROID_MAX_VERTS);
        let step = std::f32::consts::TAU / verts as f32;
        let points = (0..verts)
            .map(|i| {
                let r = radius
                    * rand_between(rng, ASTEROID_JAGGEDNESS_MIN, ASTEROID_JAGGEDNESS_MAX);
                polar_to_cartesian(r, step * i as f32)
            })
            .collect();

        Self {
            pos,
            vel,
            radius,
            generation,
            points,
        }
    }

    /// Outline offsets relative to the center
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_destroyed(&self) -> bool {
        self.radius <= 0.0
    }

    /// Flag for removal at the end of the collision pass
    pub fn mark_destroyed(&mut self) {
        self.radius = 0.0;
    }

    /// Points awarded for shooting this asteroid
    pub fn score_value(&self) -> u64 {
        score_for_generation(self.generation)
    }

    /// Children produced when this asteroid is shot.
    /// Large rocks split in two, each flung in an independent random direction.
    pub fn fragment<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Asteroid> {
        if self.radius <= ASTEROID_SPLIT_RADIUS {
            return Vec::new();
        }

        let child_radius = self.radius / ASTEROID_SPLIT_DIVISOR;
        (0..2)
            .map(|_| {
                let angle = rand_between(rng, 0.0, std::f32::consts::TAU);
                let speed = rand_between(rng, FRAGMENT_MIN_SPEED, FRAGMENT_MAX_SPEED);
                Asteroid::new(
                    rng,
                    self.pos,
                    child_radius,
                    polar_to_cartesian(speed, angle),
                    self.generation + 1,
                )
            })
            .collect()
    }
}

impl Movable for Asteroid {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, bounds);
    }
}

/// Score lookup by generation; anything past the table is worth the maximum
pub fn score_for_generation(generation: u32) -> u64 {
    let index = generation.saturating_sub(1) as usize;
    SCORE_TABLE.get(index).copied().unwrap_or(SCORE_FALLBACK)
}

/// Spawn `count` first-generation asteroids along the plane edges
pub fn spawn_asteroids<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, count: usize) -> Vec<Asteroid> {
    (0..count)
        .map(|_| {
            // 0 = top, 1 = bottom, 2 = left, 3 = right
            let edge = rng.random_range(0..4u8);
            let x = match edge {
                0 | 1 => rand_between(rng, 0.0, bounds.x),
                2 => 0.0,
                _ => bounds.x,
            };
            let y = match edge {
                0 => 0.0,
                1 => bounds.y,
                _ => rand_between(rng, 0.0, bounds.y),
            };
            let radius = rand_between(rng, ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS);
            let vel = Vec2::new(
                rand_between(rng, -ASTEROID_MAX_SPEED, ASTEROID_MAX_SPEED),
                rand_between(rng, -ASTEROID_MAX_SPEED, ASTEROID_MAX_SPEED),
            );
            Asteroid::new(rng, wrap_position(Vec2::new(x, y), bounds), radius, vel, 1)
        })
        .collect()
}
