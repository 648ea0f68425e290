//! Collision detection and resolution
//!
//! Everything is a circle: the ship and asteroids use their radii, bullets
//! are treated as points against the asteroid radius.

use glam::Vec2;
use rand::Rng;

use super::asteroid::Asteroid;
use super::entity::Movable;
use super::ship::Ship;
use crate::distance;

/// Strict circle overlap: touching at exactly `reach` is a miss
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, reach: f32) -> bool {
    distance(a, b) < reach
}

/// Strict overlap between two entities' centers
#[inline]
pub fn entities_overlap(a: &impl Movable, b: &impl Movable, reach: f32) -> bool {
    circles_overlap(a.pos(), b.pos(), reach)
}

/// Check the ship against every asteroid.
///
/// Marks the ship dead on the first hit and returns true. A dead or
/// invulnerable ship never collides.
pub fn ship_asteroid_collision(ship: &mut Ship, asteroids: &[Asteroid]) -> bool {
    for asteroid in asteroids {
        if ship.is_vulnerable()
            && entities_overlap(&*ship, asteroid, asteroid.radius() + ship.radius())
        {
            ship.dead = true;
            return true;
        }
    }
    false
}

/// Outcome of one bullet-vs-asteroid pass
#[derive(Debug, Clone, Default)]
pub struct BulletHits {
    /// Points earned this frame
    pub score: u64,
    /// Asteroids destroyed this frame
    pub destroyed: u32,
    /// Fragments spawned this frame
    pub fragments: u32,
}

/// Resolve bullet hits and rebuild the live asteroid list.
///
/// Every (asteroid, bullet) pair is checked in order. A hit spends the
/// bullet, scores, fragments the rock and zeroes its radius, so later
/// bullets in the same frame see radius 0 and pass through its remains.
/// Spent bullets are not skipped: one bullet may still clip a later rock.
pub fn bullet_asteroid_collisions<R: Rng + ?Sized>(
    ship: &mut Ship,
    asteroids: &mut Vec<Asteroid>,
    rng: &mut R,
) -> BulletHits {
    let mut hits = BulletHits::default();
    let mut survivors = Vec::with_capacity(asteroids.len() + 2);

    for mut asteroid in asteroids.drain(..) {
        for bullet in &mut ship.bullets {
            if entities_overlap(&*bullet, &asteroid, asteroid.radius()) {
                bullet.expire();
                hits.score += asteroid.score_value();
                let children = asteroid.fragment(rng);
                hits.fragments += children.len() as u32;
                hits.destroyed += 1;
                log::debug!(
                    "Asteroid gen {} (r={:.1}) destroyed, {} fragments",
                    asteroid.generation,
                    asteroid.radius,
                    children.len()
                );
                survivors.extend(children);
                asteroid.mark_destroyed();
            }
        }
        if !asteroid.is_destroyed() {
            survivors.push(asteroid);
        }
    }

    *asteroids = survivors;
    ship.score += hits.score;
    hits
}
