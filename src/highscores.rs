//! Best score tracking
//!
//! A single non-negative integer stored as a decimal string under
//! `"highScore"`. Storage trouble never interrupts play: failures are logged
//! and the in-memory value stays at its last known state.

use crate::persistence::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished game's score. Returns true if it is a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the stored best, treating missing or unreadable values as 0
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_value(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score {best}");
                    Self { best }
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable high score {raw:?}: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load high score: {e}");
                Self::default()
            }
        }
    }

    /// Persist the current best. Returns false if the write failed.
    pub fn save(&self, storage: &mut impl Storage) -> bool {
        match storage.set_value(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => {
                log::info!("High score saved ({})", self.best);
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, UnavailableStorage};

    #[test]
    fn test_submit_only_beats() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(100));
        assert!(!hs.submit(40));
        assert!(hs.submit(101));
        assert_eq!(hs.best(), 101);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        assert_eq!(HighScore::load(&storage).best(), 0);

        assert!(HighScore::new(870).save(&mut storage));
        assert_eq!(
            storage.get_value(HighScore::STORAGE_KEY),
            Ok(Some("870".to_string()))
        );
        assert_eq!(HighScore::load(&storage).best(), 870);
    }

    #[test]
    fn test_unreadable_value_is_zero() {
        let mut storage = MemoryStorage::new();
        storage.set_value(HighScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(HighScore::load(&storage).best(), 0);
        storage.set_value(HighScore::STORAGE_KEY, "-5").unwrap();
        assert_eq!(HighScore::load(&storage).best(), 0);
    }

    #[test]
    fn test_unavailable_storage_is_swallowed() {
        let mut storage = UnavailableStorage;
        assert_eq!(HighScore::load(&storage).best(), 0);
        assert!(!HighScore::new(5).save(&mut storage));
    }
}
