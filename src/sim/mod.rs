//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of timers, storage
//! and rendering:
//! - Fixed timestep only
//! - Randomness only through the caller's RNG
//! - Stable iteration order (spawn order)

pub mod achievements;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, AchievementId, Achievements};
pub use collision::{Aabb, Bounded, collides};
pub use spawn::{EnemyTemplate, explosion, spawn_enemy, spawn_power_up};
pub use state::{
    Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameSession, Particle, Player, PowerUp,
    PowerUpKind, Viewport,
};
pub use tick::tick;
