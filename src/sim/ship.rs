//! The player's ship

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::entity::Movable;
use crate::consts::*;
use crate::{polar_to_cartesian, rand_between, wrap_position};

/// Heading after a reset: nose up on a y-down screen
pub const START_HEADING: f32 = -std::f32::consts::FRAC_PI_2;

/// The player's ship, with its lives, score and live bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (0 = +x)
    pub angle: f32,
    pub thrust: bool,
    pub radius: f32,
    /// Frames of collision immunity remaining
    pub invulnerable: u32,
    /// Destroyed and waiting for the deferred life loss
    pub dead: bool,
    pub lives: u32,
    pub score: u64,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
}

impl Ship {
    /// Fresh ship centered in the plane, full lives, no immunity
    pub fn new(bounds: Vec2) -> Self {
        Self {
            pos: bounds / 2.0,
            vel: Vec2::ZERO,
            angle: START_HEADING,
            thrust: false,
            radius: SHIP_RADIUS,
            invulnerable: 0,
            dead: false,
            lives: SHIP_START_LIVES,
            score: 0,
            bullets: Vec::with_capacity(MAX_BULLETS),
        }
    }

    /// Rotate by `delta` radians (one key press)
    pub fn turn(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Fire a bullet along the current heading.
    /// Returns false when the bullet cap is already reached.
    pub fn shoot(&mut self) -> bool {
        if self.bullets.len() >= MAX_BULLETS {
            return false;
        }
        self.bullets.push(Bullet::new(self.pos, self.angle));
        true
    }

    /// Jump to a random spot in the plane.
    /// Returns true when the jump went wrong and the ship is now dead.
    pub fn hyperspace<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Vec2) -> bool {
        self.pos = Vec2::new(
            rand_between(rng, 0.0, bounds.x),
            rand_between(rng, 0.0, bounds.y),
        );
        self.pos = wrap_position(self.pos, bounds);
        let mishap = rng.random_bool(HYPERSPACE_MISHAP_ODDS);
        if mishap {
            self.dead = true;
        }
        mishap
    }

    /// Recenter after a lost life or at game start
    pub fn reset(&mut self, bounds: Vec2) {
        self.pos = bounds / 2.0;
        self.vel = Vec2::ZERO;
        self.angle = START_HEADING;
        self.invulnerable = SHIP_INVULNERABLE_FRAMES;
        self.dead = false;
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.dead && self.invulnerable == 0
    }

    /// Score needed for the next extra life, derived from the current lives
    pub fn extra_life_threshold(&self) -> i64 {
        (self.lives as i64 - SHIP_START_LIVES as i64 + 1) * EXTRA_LIFE_STEP
    }

    /// Grant a life if the score has reached the threshold.
    /// Checked every frame; at most one life per call.
    pub fn award_extra_life(&mut self) -> bool {
        if self.score as i64 >= self.extra_life_threshold() {
            self.lives += 1;
            true
        } else {
            false
        }
    }
}

impl Movable for Ship {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, bounds: Vec2) {
        if self.thrust {
            self.vel += polar_to_cartesian(SHIP_THRUST, self.angle);
        }
        self.vel *= SHIP_DAMPING;
        self.pos = wrap_position(self.pos + self.vel, bounds);

        for bullet in &mut self.bullets {
            bullet.update(bounds);
        }
        self.bullets.retain(|b| b.is_alive());

        if self.invulnerable > 0 {
            self.invulnerable -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_new_ship_centered() {
        let ship = Ship::new(BOUNDS);
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.lives, 3);
        assert_eq!(ship.score, 0);
        assert_eq!(ship.invulnerable, 0);
        assert!(!ship.dead);
    }

    #[test]
    fn test_thrust_and_damping() {
        let mut ship = Ship::new(BOUNDS);
        ship.angle = 0.0;
        ship.thrust = true;
        ship.update(BOUNDS);
        assert!((ship.vel.x - SHIP_THRUST * SHIP_DAMPING).abs() < 1e-6);
        assert!(ship.vel.y.abs() < 1e-6);

        // Coasting still damps
        ship.thrust = false;
        let before = ship.vel.x;
        ship.update(BOUNDS);
        assert!((ship.vel.x - before * SHIP_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn test_shoot_respects_cap() {
        let mut ship = Ship::new(BOUNDS);
        for _ in 0..MAX_BULLETS {
            assert!(ship.shoot());
        }
        assert!(!ship.shoot());
        assert_eq!(ship.bullets.len(), MAX_BULLETS);
    }

    #[test]
    fn test_bullets_pruned_when_spent() {
        let mut ship = Ship::new(BOUNDS);
        ship.shoot();
        for _ in 0..BULLET_LIFETIME {
            ship.update(BOUNDS);
        }
        assert!(ship.bullets.is_empty());
    }

    #[test]
    fn test_reset_grants_invulnerability() {
        let mut ship = Ship::new(BOUNDS);
        ship.pos = Vec2::new(10.0, 20.0);
        ship.vel = Vec2::new(3.0, -1.0);
        ship.angle = 1.0;
        ship.dead = true;
        ship.reset(BOUNDS);
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.angle, START_HEADING);
        assert_eq!(ship.invulnerable, SHIP_INVULNERABLE_FRAMES);
        assert!(!ship.dead);
        assert!(!ship.is_vulnerable());

        for _ in 0..SHIP_INVULNERABLE_FRAMES {
            ship.update(BOUNDS);
        }
        assert!(ship.is_vulnerable());
    }

    #[test]
    fn test_hyperspace_lands_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut ship = Ship::new(BOUNDS);
        let mut mishaps = 0;
        for _ in 0..600 {
            ship.dead = false;
            if ship.hyperspace(&mut rng, BOUNDS) {
                assert!(ship.dead);
                mishaps += 1;
            }
            assert!(ship.pos.x >= 0.0 && ship.pos.x < BOUNDS.x);
            assert!(ship.pos.y >= 0.0 && ship.pos.y < BOUNDS.y);
        }
        // Roughly one in six, with generous slack
        assert!(mishaps > 50 && mishaps < 150, "mishaps = {mishaps}");
    }

    #[test]
    fn test_extra_life_threshold_tracks_lives() {
        let mut ship = Ship::new(BOUNDS);
        assert_eq!(ship.extra_life_threshold(), 10_000);

        ship.score = 9_999;
        assert!(!ship.award_extra_life());

        ship.score = 10_000;
        assert!(ship.award_extra_life());
        assert_eq!(ship.lives, 4);
        // Next life now needs 20k
        assert_eq!(ship.extra_life_threshold(), 20_000);
        assert!(!ship.award_extra_life());
    }

    #[test]
    fn test_extra_life_refills_below_start_lives() {
        let mut ship = Ship::new(BOUNDS);
        ship.lives = 2;
        // Threshold is 0, so any score qualifies
        assert_eq!(ship.extra_life_threshold(), 0);
        assert!(ship.award_extra_life());
        assert_eq!(ship.lives, 3);
        assert!(!ship.award_extra_life());
    }

    proptest! {
        #[test]
        fn prop_bullet_cap_holds(actions in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut ship = Ship::new(BOUNDS);
            for shoot in actions {
                if shoot {
                    ship.shoot();
                } else {
                    ship.update(BOUNDS);
                }
                prop_assert!(ship.bullets.len() <= MAX_BULLETS);
            }
        }

        #[test]
        fn prop_ship_stays_in_bounds(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            angle in -10.0f32..10.0,
            thrust in any::<bool>(),
        ) {
            let mut ship = Ship::new(BOUNDS);
            ship.pos = Vec2::new(x, y);
            ship.vel = Vec2::new(vx, vy);
            ship.angle = angle;
            ship.thrust = thrust;
            ship.shoot();
            for _ in 0..10 {
                ship.update(BOUNDS);
                prop_assert!(ship.pos.x >= 0.0 && ship.pos.x < BOUNDS.x);
                prop_assert!(ship.pos.y >= 0.0 && ship.pos.y < BOUNDS.y);
                for bullet in &ship.bullets {
                    prop_assert!(bullet.pos.x >= 0.0 && bullet.pos.x < BOUNDS.x);
                    prop_assert!(bullet.pos.y >= 0.0 && bullet.pos.y < BOUNDS.y);
                }
            }
        }
    }
}
