//! Game state and session transitions
//!
//! One `GameState` per session, owned by the driver and passed to `tick`
//! and the renderer. Nothing here touches a clock directly: every method
//! that defers work takes the current monotonic time in milliseconds.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, spawn_asteroids};
use super::collision::{BulletHits, bullet_asteroid_collisions, ship_asteroid_collision};
use super::schedule::{Command, Scheduler};
use super::ship::Ship;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    Start,
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for a restart
    GameOver,
}

/// Notifications for the driver (overlay toggles, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    InstructionsHidden,
    InstructionsShown,
    ShipDestroyed,
    LifeLost { remaining: u32 },
    ExtraLife { lives: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Plane width and height
    pub bounds: Vec2,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Live asteroids (order irrelevant)
    pub asteroids: Vec<Asteroid>,
    /// Deferred transitions
    pub scheduler: Scheduler,
    /// Frames simulated while playing
    pub frame: u64,
    /// Events not yet collected by the driver
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Random stream, saved with the state so a restored game continues it
    rng: Pcg32,
}

impl GameState {
    /// Create an idle session on the title screen
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        Self {
            seed,
            bounds,
            level: 1,
            phase: GamePhase::Start,
            ship: Ship::new(bounds),
            asteroids: Vec::new(),
            scheduler: Scheduler::new(),
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a new game (accepted from any phase)
    pub fn start(&mut self) {
        let mut ship = Ship::new(self.bounds);
        ship.reset(self.bounds);
        self.ship = ship;
        self.asteroids = spawn_asteroids(&mut self.rng, self.bounds, FIRST_LEVEL_ASTEROIDS);
        self.level = 1;
        self.frame = 0;
        self.scheduler.clear();
        self.phase = GamePhase::Playing;
        log::info!("Game started: {} asteroids", self.asteroids.len());
        self.emit(GameEvent::InstructionsHidden);
        self.emit(GameEvent::LevelStarted { level: self.level });
    }

    /// Advance to the next level and refill the field
    pub fn next_level(&mut self) {
        self.level += 1;
        let count = LEVEL_ASTEROID_BASE + self.level as usize;
        self.asteroids = spawn_asteroids(&mut self.rng, self.bounds, count);
        log::info!("Level {} ({} asteroids)", self.level, count);
        self.emit(GameEvent::LevelStarted { level: self.level });
    }

    /// Apply a lost life; ends the game when none remain
    pub fn lose_life(&mut self, now_ms: f64) {
        self.ship.lives = self.ship.lives.saturating_sub(1);
        self.emit(GameEvent::LifeLost {
            remaining: self.ship.lives,
        });
        if self.ship.lives > 0 {
            self.ship.reset(self.bounds);
            log::debug!("Life lost, {} remaining", self.ship.lives);
        } else {
            self.phase = GamePhase::GameOver;
            self.scheduler
                .schedule(now_ms, INSTRUCTIONS_DELAY_MS, Command::ShowInstructions);
            log::info!(
                "Game over: score {} at level {}",
                self.ship.score,
                self.level
            );
            self.emit(GameEvent::GameOver {
                score: self.ship.score,
            });
        }
    }

    /// Mark the ship destroyed and defer the life loss for the death pause
    pub fn destroy_ship(&mut self, now_ms: f64) {
        self.ship.dead = true;
        self.scheduler
            .schedule(now_ms, LOSE_LIFE_DELAY_MS, Command::LoseLife);
        log::debug!("Ship destroyed at {:?}", self.ship.pos);
        self.emit(GameEvent::ShipDestroyed);
    }

    /// Hyperspace jump; a misfire kills the ship unless it is already dead
    pub fn hyperspace(&mut self, now_ms: f64) {
        let was_dead = self.ship.dead;
        if self.ship.hyperspace(&mut self.rng, self.bounds) && !was_dead {
            log::debug!("Hyperspace mishap");
            self.destroy_ship(now_ms);
        }
    }

    /// Resolve this frame's collisions: ship first, then bullets
    pub fn resolve_collisions(&mut self, now_ms: f64) -> BulletHits {
        if ship_asteroid_collision(&mut self.ship, &self.asteroids) {
            self.destroy_ship(now_ms);
        }
        bullet_asteroid_collisions(&mut self.ship, &mut self.asteroids, &mut self.rng)
    }

    /// Queue a level advance once the field is empty (once per clear)
    pub fn schedule_level_clear(&mut self, now_ms: f64) {
        if self.is_playing()
            && self.asteroids.is_empty()
            && !self.scheduler.is_pending(Command::NextLevel)
        {
            self.scheduler
                .schedule(now_ms, NEXT_LEVEL_DELAY_MS, Command::NextLevel);
            log::debug!("Level {} cleared", self.level);
        }
    }

    /// Run every deferred command due at `now_ms`
    pub fn run_due_commands(&mut self, now_ms: f64) {
        for command in self.scheduler.drain_due(now_ms) {
            match command {
                // Gameplay commands are stale once the session has left play
                Command::LoseLife if self.is_playing() => self.lose_life(now_ms),
                Command::NextLevel if self.is_playing() => self.next_level(),
                Command::ShowInstructions => self.emit(GameEvent::InstructionsShown),
                stale => log::debug!("Dropping {:?} outside play", stale),
            }
        }
    }
}
