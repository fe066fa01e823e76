//! Game session and core simulation types
//!
//! Everything the presentation layer draws lives in `GameSession`. The
//! session is only mutated through its own methods and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::achievements::{AchievementId, Achievements};
use super::collision::{Aabb, Bounded};
use crate::clamp_lenient;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-game
    Paused,
    /// Run ended
    GameOver,
}

/// Playfield size in logical points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// The player's fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u8,
    pub max_health: u8,
    /// Absorbs the next enemy contact; never expires
    pub has_shield: bool,
    /// Session clock (ms) at which invincibility ends
    pub invincible_until: Option<u64>,
    /// Session clock (ms) at which triple shot ends
    pub triple_shot_until: Option<u64>,
}

impl Player {
    /// Fresh fighter near the bottom centre of the viewport
    pub fn spawn(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0,
                viewport.height - PLAYER_SPAWN_OFFSET,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            has_shield: false,
            invincible_until: None,
            triple_shot_until: None,
        }
    }

    pub fn invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    pub fn has_triple_shot(&self) -> bool {
        self.triple_shot_until.is_some()
    }

    /// Drop timed effects whose deadline has passed
    pub fn expire_effects(&mut self, now_ms: u64) {
        if self.invincible_until.is_some_and(|t| now_ms >= t) {
            self.invincible_until = None;
        }
        if self.triple_shot_until.is_some_and(|t| now_ms >= t) {
            self.triple_shot_until = None;
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Heavy,
}

/// An enemy fighter descending the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    /// Points awarded on destruction
    pub score: u32,
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: i32,
    pub from_player: bool,
}

impl Bullet {
    pub fn player(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            damage: 1,
            from_player: true,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Three-way spread for a limited time
    TripleShot,
    /// Absorbs one enemy contact
    Shield,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Notable things that happened during a tick, for UI feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed { kind: EnemyKind, pos: Vec2, score: u32 },
    EnemyEscaped { kind: EnemyKind },
    PlayerHit { health: u8 },
    ShieldAbsorbed,
    PowerUpCollected { kind: PowerUpKind },
    AchievementUnlocked { id: AchievementId },
    LevelUp { level: u32 },
    GameOver { score: u32, new_high_score: bool },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    /// Best score seen, carried across games
    pub high_score: u32,
    pub enemies_killed: u32,
    pub survival_secs: u32,
    /// Kills since the player last took damage
    pub combo: u32,
    /// Simulation clock (ms), advances only while playing
    pub time_ms: u64,
    pub viewport: Viewport,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Upper bound on live particles
    pub particle_cap: usize,
    pub achievements: Achievements,
    /// Pending UI events, drained by the presentation layer
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    /// A session on the menu screen
    pub fn new(viewport: Viewport, high_score: u32) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            level: 1,
            high_score,
            enemies_killed: 0,
            survival_secs: 0,
            combo: 0,
            time_ms: 0,
            viewport,
            player: Player::spawn(viewport),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            particle_cap: usize::MAX,
            achievements: Achievements::default(),
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Reset to a fresh game and begin playing. The high score survives.
    pub fn start(&mut self) {
        self.score = 0;
        self.level = 1;
        self.enemies_killed = 0;
        self.survival_secs = 0;
        self.combo = 0;
        self.time_ms = 0;
        self.player = Player::spawn(self.viewport);
        self.enemies.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.achievements.reset();
        self.events.clear();
        self.phase = GamePhase::Playing;
    }

    /// Returns false if the session was not playing
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Returns false if the session was not paused
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// End the run. Returns true if the score beat the previous best.
    pub fn end(&mut self) -> bool {
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
        new_high_score
    }

    /// Follow the pointer, keeping the whole fighter on screen
    pub fn move_player(&mut self, x: f32, y: f32) {
        if !self.is_playing() {
            return;
        }
        let half = self.player.size / 2.0;
        self.player.pos = Vec2::new(
            clamp_lenient(x, half.x, self.viewport.width - half.x),
            clamp_lenient(y, half.y, self.viewport.height - half.y),
        );
    }

    /// Fire from the muzzle: one bullet, or a three-way spread with triple shot
    pub fn shoot_bullet(&mut self) {
        if !self.is_playing() {
            return;
        }
        let muzzle = self.player.pos - Vec2::new(0.0, MUZZLE_OFFSET);
        let straight = Vec2::new(0.0, -BULLET_SPEED);

        if self.player.has_triple_shot() {
            let (sx, sy) = SPREAD_VELOCITY;
            self.bullets.extend([
                Bullet::player(muzzle - Vec2::new(SPREAD_OFFSET, 0.0), Vec2::new(-sx, sy)),
                Bullet::player(muzzle, straight),
                Bullet::player(muzzle + Vec2::new(SPREAD_OFFSET, 0.0), Vec2::new(sx, sy)),
            ]);
        } else {
            self.bullets.push(Bullet::player(muzzle, straight));
        }
    }

    /// Add one second of survival time
    pub fn survive_second(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.survival_secs += 1;
        self.record_achievement(AchievementId::Survivor, self.survival_secs);
    }

    /// Subtract points without going below zero
    pub fn lose_points(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Apply the achievement rule, announcing fresh unlocks
    pub fn record_achievement(&mut self, id: AchievementId, value: u32) {
        if self.achievements.record(id, value) {
            log::info!("Achievement unlocked: {}", id.name());
            self.push_event(GameEvent::AchievementUnlocked { id });
        }
    }

    /// Add particles, dropping any beyond the cap
    pub fn add_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        let room = self.particle_cap.saturating_sub(self.particles.len());
        self.particles.extend(particles.into_iter().take(room));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
