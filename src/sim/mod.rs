//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, driven by `tick`
//! - Seeded RNG only
//! - Deferred transitions go through the `Scheduler`, never wall-clock timers
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod autopilot;
pub mod bullet;
pub mod collision;
pub mod entity;
pub mod schedule;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, score_for_generation, spawn_asteroids};
pub use autopilot::demo_keys;
pub use bullet::Bullet;
pub use collision::{BulletHits, bullet_asteroid_collisions, circles_overlap, ship_asteroid_collision};
pub use entity::Movable;
pub use schedule::{Command, Scheduler};
pub use ship::Ship;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Key, KeyEvent, TickInput, apply_key, tick};
