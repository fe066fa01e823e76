//! Game settings and preferences
//!
//! Persisted as JSON through the same key-value storage as the high score.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::Storage;
use crate::sim::Viewport;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Simulation ===
    /// Simulation ticks per second
    pub tick_hz: u32,
    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,
    /// Fire automatically while playing
    pub auto_fire: bool,

    // === Visual Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explosion particles
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            tick_hz: DEFAULT_TICK_HZ,
            seed: None,
            auto_fire: true,
            quality: QualityPreset::Medium,
            particles: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "settings";

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_value(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings unreadable, using defaults: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and ignored
    pub fn save(&self, storage: &mut impl Storage) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {e}");
                return;
            }
        };
        match storage.set_value(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {e}"),
        }
    }
}
