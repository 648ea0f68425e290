//! Shared motion capability for everything that drifts across the plane

use glam::Vec2;

/// An entity integrated once per frame on the toroidal plane
pub trait Movable {
    fn pos(&self) -> Vec2;
    /// Collision radius
    fn radius(&self) -> f32;
    /// Advance one frame, wrapping position into `bounds`
    fn update(&mut self, bounds: Vec2);
}

