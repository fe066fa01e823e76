//! Browser bindings
//!
//! Thin wasm-bindgen wrapper so a JS front end can drive the game from
//! pointer events and `requestAnimationFrame`, and read state back as JSON.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStorage;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Sky Fighter starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game sized to the given viewport
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let storage = LocalStorage;
        let settings = Settings {
            viewport_width: width,
            viewport_height: height,
            ..Settings::load(&storage)
        };
        WebGame {
            game: Game::new(settings, storage),
        }
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    pub fn end(&mut self) {
        self.game.end();
    }

    #[wasm_bindgen(js_name = movePlayer)]
    pub fn move_player(&mut self, x: f32, y: f32) {
        self.game.move_player(x, y);
    }

    pub fn shoot(&mut self) {
        self.game.shoot_bullet();
    }

    /// Call once per animation frame with the elapsed milliseconds
    pub fn frame(&mut self, dt_ms: f64) {
        self.game.advance(dt_ms.max(0.0).round() as u32);
    }

    /// Full session state as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.game.session()).unwrap_or_default()
    }

    /// Live particles as JSON (not part of the snapshot)
    pub fn particles(&self) -> String {
        serde_json::to_string(&self.game.session().particles).unwrap_or_default()
    }

    /// Pending events as JSON, clearing them
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.game.drain_events()).unwrap_or_default()
    }
}
