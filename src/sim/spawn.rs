//! Enemy, power-up and particle spawning
//!
//! All randomness comes from the caller's RNG so a seeded generator
//! reproduces the same waves.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameSession, Particle, PowerUp, PowerUpKind};
use crate::consts::*;

/// Spawn weights, in draw order
const ENEMY_WEIGHTS: [(EnemyKind, f32); 3] = [
    (EnemyKind::Basic, 0.6),
    (EnemyKind::Fast, 0.3),
    (EnemyKind::Heavy, 0.1),
];

/// Explosion palette (orange, amber, red, yellow)
pub const EXPLOSION_COLORS: [u32; 4] = [0xFF6B00, 0xFFAA00, 0xFF0000, 0xFFFF00];

/// Per-kind spawn template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub health: i32,
    pub speed: f32,
    pub size: f32,
    pub score: u32,
}

impl EnemyKind {
    /// Weighted pick from a uniform draw in [0, 1).
    /// The first kind whose cumulative weight exceeds `roll` wins.
    pub fn from_roll(roll: f32) -> Self {
        let mut cumulative = 0.0;
        for (kind, weight) in ENEMY_WEIGHTS {
            cumulative += weight;
            if roll < cumulative {
                return kind;
            }
        }
        EnemyKind::Basic
    }

    /// Stats for this kind at the given level
    pub fn template(&self, level: u32) -> EnemyTemplate {
        let level = level as f32;
        match self {
            EnemyKind::Basic => EnemyTemplate {
                health: 1,
                speed: 2.0 + level * 0.3,
                size: 40.0,
                score: 10,
            },
            EnemyKind::Fast => EnemyTemplate {
                health: 1,
                speed: 4.0 + level * 0.5,
                size: 30.0,
                score: 20,
            },
            EnemyKind::Heavy => EnemyTemplate {
                health: 3,
                speed: 1.0 + level * 0.2,
                size: 60.0,
                score: 50,
            },
        }
    }
}

impl PowerUpKind {
    /// Uniform pick from a draw in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.5 {
            PowerUpKind::TripleShot
        } else {
            PowerUpKind::Shield
        }
    }
}

impl Enemy {
    /// Build an enemy of `kind` just above the top edge. `x_roll` in [0, 1)
    /// places it horizontally so the whole body stays inside the viewport.
    pub fn spawn(kind: EnemyKind, level: u32, viewport_width: f32, x_roll: f32) -> Self {
        let t = kind.template(level);
        Self {
            kind,
            pos: Vec2::new(x_roll * (viewport_width - t.size) + t.size / 2.0, -t.size),
            vel: Vec2::new(0.0, t.speed),
            size: t.size,
            health: t.health,
            max_health: t.health,
            score: t.score,
        }
    }
}

impl PowerUp {
    pub fn spawn(kind: PowerUpKind, viewport_width: f32, x_roll: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(
                x_roll * (viewport_width - POWERUP_SIZE) + POWERUP_SIZE / 2.0,
                -POWERUP_SIZE / 2.0,
            ),
            vel: Vec2::new(0.0, POWERUP_SPEED),
            size: POWERUP_SIZE,
        }
    }
}

/// Add a random enemy at the top of the screen
pub fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameSession, rng: &mut R) {
    if !state.is_playing() {
        return;
    }
    let kind = EnemyKind::from_roll(rng.random());
    let enemy = Enemy::spawn(kind, state.level, state.viewport.width, rng.random());
    log::debug!("Spawned {:?} enemy at x={:.1}", kind, enemy.pos.x);
    state.enemies.push(enemy);
}

/// Add a random power-up at the top of the screen
pub fn spawn_power_up<R: Rng + ?Sized>(state: &mut GameSession, rng: &mut R) {
    if !state.is_playing() {
        return;
    }
    let kind = PowerUpKind::from_roll(rng.random());
    let power_up = PowerUp::spawn(kind, state.viewport.width, rng.random());
    log::debug!("Spawned {:?} power-up at x={:.1}", kind, power_up.pos.x);
    state.power_ups.push(power_up);
}

/// A ring of `count` particles bursting out from `pos`
pub fn explosion<R: Rng + ?Sized>(pos: Vec2, count: usize, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.random::<f32>() * 5.0 + 2.0;
            Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                size: rng.random::<f32>() * 4.0 + 2.0,
                color: EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())],
            }
        })
        .collect()
}
