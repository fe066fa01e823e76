//! Game facade
//!
//! `Game` is the single writer of a session: input, timers and persistence
//! all go through `&mut Game`, so no two mutations can interleave. Hosts
//! either call the methods directly or queue `Command`s and `apply` them
//! from one place.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::schedule::{Fired, Schedule, Trigger};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameSession};

/// Everything a host can ask of the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    End,
    MovePlayer { x: f32, y: f32 },
    Shoot,
    /// Let `dt_ms` of real time pass
    Advance { dt_ms: u32 },
}

pub struct Game<S: Storage, R: Rng = Pcg32> {
    session: GameSession,
    schedule: Schedule,
    settings: Settings,
    storage: S,
    rng: R,
}

impl<S: Storage> Game<S, Pcg32> {
    /// Seeded from `settings.seed`, or a random seed when unset
    pub fn new(settings: Settings, storage: S) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("RNG seed: {seed}");
        Self::with_rng(settings, storage, Pcg32::seed_from_u64(seed))
    }
}

impl<S: Storage, R: Rng> Game<S, R> {
    /// Build a game around a caller-supplied RNG
    pub fn with_rng(settings: Settings, storage: S, rng: R) -> Self {
        let high_score = HighScore::load(&storage);
        let mut session = GameSession::new(settings.viewport(), high_score.best());
        session.particle_cap = settings.max_particles();
        Self {
            session,
            schedule: Schedule::new(&settings),
            settings,
            storage,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Begin a new game, cancelling any timers from the previous one
    pub fn start(&mut self) {
        self.schedule.disarm_all();
        self.session.particle_cap = self.settings.max_particles();
        self.session.start();
        self.schedule.reset_clock();
        self.schedule.arm_all();
        log::info!("Game started (best {})", self.session.high_score);
    }

    pub fn pause(&mut self) {
        if self.session.pause() {
            self.schedule.disarm_all();
            log::info!("Paused at {} ms", self.session.time_ms);
        }
    }

    pub fn resume(&mut self) {
        if self.session.resume() {
            self.schedule.arm_all();
            log::info!("Resumed");
        }
    }

    /// End the current game (playing or paused)
    pub fn end(&mut self) {
        if !matches!(self.session.phase, GamePhase::Playing | GamePhase::Paused) {
            return;
        }
        let best_before = self.session.high_score;
        self.session.end();
        self.finish(best_before);
    }

    pub fn move_player(&mut self, x: f32, y: f32) {
        self.session.move_player(x, y);
    }

    pub fn shoot_bullet(&mut self) {
        self.session.shoot_bullet();
    }

    /// One simulation step of the configured tick length
    pub fn tick(&mut self) {
        let dt_ms = 1000 / self.settings.tick_hz.max(1);
        self.run_tick(dt_ms);
    }

    pub fn spawn_enemy(&mut self) {
        sim::spawn_enemy(&mut self.session, &mut self.rng);
    }

    pub fn spawn_power_up(&mut self) {
        sim::spawn_power_up(&mut self.session, &mut self.rng);
    }

    pub fn survive_second(&mut self) {
        self.session.survive_second();
    }

    /// Let real time pass: run every timer that comes due, in order.
    /// Large gaps (a backgrounded app) are capped to one frame's worth.
    pub fn advance(&mut self, dt_ms: u32) {
        let dt_ms = dt_ms.min(MAX_FRAME_MS);
        let fired = self.schedule.advance(u64::from(dt_ms) * 1000);
        for Fired { at_us, trigger } in fired {
            // A fatal tick disarms the schedule; drop the rest of the frame
            if !self.session.is_playing() {
                break;
            }
            self.dispatch(trigger, at_us);
        }
    }

    /// Apply a queued command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::End => self.end(),
            Command::MovePlayer { x, y } => self.move_player(x, y),
            Command::Shoot => self.shoot_bullet(),
            Command::Advance { dt_ms } => self.advance(dt_ms),
        }
    }

    /// Take pending UI events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    fn dispatch(&mut self, trigger: Trigger, at_us: u64) {
        match trigger {
            Trigger::Tick => {
                // Keep the session clock locked to the schedule's play clock
                let now_ms = at_us / 1000;
                let dt_ms = now_ms.saturating_sub(self.session.time_ms);
                self.run_tick(u32::try_from(dt_ms).unwrap_or(u32::MAX));
            }
            Trigger::SpawnEnemy => self.spawn_enemy(),
            Trigger::SpawnPowerUp => self.spawn_power_up(),
            Trigger::SurvivalSecond => self.survive_second(),
            Trigger::AutoFire => self.shoot_bullet(),
        }
    }

    fn run_tick(&mut self, dt_ms: u32) {
        if !self.session.is_playing() {
            return;
        }
        let best_before = self.session.high_score;
        sim::tick(&mut self.session, &mut self.rng, dt_ms);
        if self.session.phase == GamePhase::GameOver {
            self.finish(best_before);
        }
    }

    /// Shared tail of every game over
    fn finish(&mut self, best_before: u32) {
        self.schedule.disarm_all();
        let score = self.session.score;
        log::info!("Game over: score {score}, level {}", self.session.level);
        let mut best = HighScore::new(best_before);
        if best.submit(score) {
            log::info!("New high score: {score}");
            best.save(&mut self.storage);
        }
    }
}
