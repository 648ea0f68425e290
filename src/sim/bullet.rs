//! Ship projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Movable;
use crate::consts::*;
use crate::{polar_to_cartesian, wrap_position};

/// A short-lived projectile fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining; 0 means spent
    pub life: u32,
    pub radius: f32,
}

impl Bullet {
    /// Fire from `pos` along `heading`
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            vel: polar_to_cartesian(BULLET_SPEED, heading),
            life: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Spend the bullet on impact
    pub fn expire(&mut self) {
        self.life = 0;
    }
}

impl Movable for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, bounds);
        self.life = self.life.saturating_sub(1);
    }
}
