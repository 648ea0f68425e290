//! Demo-mode pilot: turns toward the nearest asteroid and fires
//!
//! Produces ordinary key events, so a demo session goes through exactly the
//! same input path as a human player.

use super::state::GameState;
use super::tick::{Key, KeyEvent};
use crate::consts::SHIP_TURN_STEP;
use crate::normalize_angle;

/// Fire only when the nose is this close to the target (radians)
const AIM_TOLERANCE: f32 = 0.2;
/// Frames between shots
const FIRE_INTERVAL: u64 = 8;

/// Key presses for the current frame
pub fn demo_keys(state: &GameState) -> Vec<KeyEvent> {
    let mut keys = Vec::new();
    if !state.is_playing() {
        return keys;
    }

    let ship = &state.ship;
    let Some(target) = state.asteroids.iter().min_by(|a, b| {
        ship.pos
            .distance_squared(a.pos)
            .total_cmp(&ship.pos.distance_squared(b.pos))
    }) else {
        return keys;
    };

    let to_target = target.pos - ship.pos;
    let desired = to_target.y.atan2(to_target.x);
    let error = normalize_angle(desired - ship.angle);

    if error > SHIP_TURN_STEP / 2.0 {
        keys.push(KeyEvent::down(Key::Right));
    } else if error < -SHIP_TURN_STEP / 2.0 {
        keys.push(KeyEvent::down(Key::Left));
    }

    if error.abs() < AIM_TOLERANCE && state.frame % FIRE_INTERVAL == 0 {
        keys.push(KeyEvent::down(Key::Space));
    }

    keys
}
