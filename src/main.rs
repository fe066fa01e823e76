//! Sky Fighter entry point
//!
//! The native binary is a headless runner: it plays one game on autopilot
//! at 60 frames per simulated second and reports the result. Browser builds
//! go through `sky_fighter::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::env;

    use sky_fighter::persistence::{FileStorage, MemoryStorage, Storage};
    use sky_fighter::sim::{GameEvent, GamePhase, GameSession};
    use sky_fighter::{Game, Settings};

    const DEFAULT_SAVE_PATH: &str = "sky_fighter_save.json";
    const DEFAULT_SECONDS: u32 = 120;
    const FRAME_MS: u32 = 16;

    pub fn run() {
        let path = env::var("SKY_FIGHTER_SAVE").unwrap_or_else(|_| DEFAULT_SAVE_PATH.to_string());
        let seconds = env::var("SKY_FIGHTER_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SECONDS);

        match FileStorage::open(&path) {
            Ok(storage) => play(storage, seconds),
            Err(e) => {
                log::warn!("Save file unusable ({e}), playing without persistence");
                play(MemoryStorage::new(), seconds);
            }
        }
    }

    fn play<S: Storage>(storage: S, seconds: u32) {
        let settings = Settings::load(&storage);
        let mut game = Game::new(settings, storage);
        game.start();

        let frames = seconds * 1000 / FRAME_MS;
        for _ in 0..frames {
            let (x, y) = autopilot(game.session());
            game.move_player(x, y);
            game.advance(FRAME_MS);

            for event in game.drain_events() {
                report(&event);
            }
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }
        if game.phase() == GamePhase::Playing {
            game.end();
            for event in game.drain_events() {
                report(&event);
            }
        }

        let session = game.session();
        println!(
            "Score {} | level {} | kills {} | survived {}s | best {}",
            session.score,
            session.level,
            session.enemies_killed,
            session.survival_secs,
            session.high_score
        );
        for a in session.achievements.iter() {
            let mark = if a.unlocked { "x" } else { " " };
            println!("[{mark}] {} ({}/{})", a.id.name(), a.progress, a.target);
        }
    }

    /// Line up under the lowest enemy, or drift back to centre
    fn autopilot(session: &GameSession) -> (f32, f32) {
        let viewport = session.viewport;
        let y = viewport.height - 100.0;
        let target = session
            .enemies
            .iter()
            .filter(|e| e.pos.y < y - 80.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x)
            .unwrap_or(viewport.width / 2.0);
        let x = session.player.pos.x;
        let step = (target - x).clamp(-6.0, 6.0);
        (x + step, y)
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::AchievementUnlocked { id } => {
                log::info!("Achievement: {} - {}", id.name(), id.description())
            }
            GameEvent::PlayerHit { health } => log::info!("Hit! {health} health left"),
            GameEvent::GameOver {
                score,
                new_high_score,
            } => log::info!("Final score {score}{}", if *new_high_score { " (new best)" } else { "" }),
            other => log::debug!("{other:?}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Fighter (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
