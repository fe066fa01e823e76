//! Sky Fighter - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, achievements)
//! - `schedule`: Fixed-period triggers driving the simulation
//! - `game`: Single-writer facade owning session, RNG, timers and storage
//! - `persistence`: Key-value storage backends
//! - `highscores`: Best score load/save
//! - `settings`: Viewport, tick rate and quality preferences

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod schedule;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Command, Game};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Default viewport (logical points, portrait phone)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 844.0;
    /// Default simulation rate
    pub const DEFAULT_TICK_HZ: u32 = 60;
    /// Largest frame delta accepted by `Game::advance` (ms)
    pub const MAX_FRAME_MS: u32 = 100;

    /// Periodic triggers (ms)
    pub const ENEMY_SPAWN_PERIOD_MS: u32 = 2000;
    pub const POWERUP_SPAWN_PERIOD_MS: u32 = 15_000;
    pub const SURVIVAL_PERIOD_MS: u32 = 1000;
    pub const AUTO_FIRE_PERIOD_MS: u32 = 200;

    /// Timed effects (ms)
    pub const INVINCIBILITY_MS: u64 = 2000;
    pub const TRIPLE_SHOT_MS: u64 = 10_000;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    pub const BULLET_SPEED: f32 = 15.0;
    /// Outer bullets of a triple shot
    pub const SPREAD_VELOCITY: (f32, f32) = (2.0, -12.0);
    pub const SPREAD_OFFSET: f32 = 20.0;
    /// Bullets leave this far above the player centre
    pub const MUZZLE_OFFSET: f32 = 20.0;
    /// Bullets survive this far beyond the top/bottom edge
    pub const BULLET_MARGIN: f32 = 20.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 40.0;
    pub const POWERUP_SPEED: f32 = 2.0;

    /// Scoring
    pub const ESCAPE_PENALTY: u32 = 5;
    pub const POINTS_PER_LEVEL: u32 = 200;

    /// Explosion particle counts
    pub const HIT_PARTICLES: usize = 8;
    pub const EXPLOSION_PARTICLES: usize = 20;
    pub const PARTICLE_LIFE: u32 = 30;
}

/// Clamp `value` into `[min, max]`, preferring `min` when the range is empty
#[inline]
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
