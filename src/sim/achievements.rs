//! Achievement tracking
//!
//! A fixed set of five achievements. Progress is overwritten with the latest
//! value until the target is reached; once unlocked an achievement is frozen
//! until the next game starts.

use serde::{Deserialize, Serialize};

/// Achievement identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    /// Destroy the first enemy
    FirstBlood,
    /// Survive 60 seconds
    Survivor,
    /// Destroy 50 enemies
    Destroyer,
    /// Reach level 5
    AcePilot,
    /// 10 kills without taking damage
    Unstoppable,
}

impl AchievementId {
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstBlood,
        AchievementId::Survivor,
        AchievementId::Destroyer,
        AchievementId::AcePilot,
        AchievementId::Unstoppable,
    ];

    /// Position in the achievement set
    fn index(&self) -> usize {
        match self {
            AchievementId::FirstBlood => 0,
            AchievementId::Survivor => 1,
            AchievementId::Destroyer => 2,
            AchievementId::AcePilot => 3,
            AchievementId::Unstoppable => 4,
        }
    }

    pub fn target(&self) -> u32 {
        match self {
            AchievementId::FirstBlood => 1,
            AchievementId::Survivor => 60,
            AchievementId::Destroyer => 50,
            AchievementId::AcePilot => 5,
            AchievementId::Unstoppable => 10,
        }
    }

    /// Stable key (matches the ids shown to players)
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::Survivor => "survivor",
            AchievementId::Destroyer => "destroyer",
            AchievementId::AcePilot => "ace_pilot",
            AchievementId::Unstoppable => "unstoppable",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "First Blood",
            AchievementId::Survivor => "Survivor",
            AchievementId::Destroyer => "Destroyer",
            AchievementId::AcePilot => "Ace Pilot",
            AchievementId::Unstoppable => "Unstoppable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "Destroy your first enemy",
            AchievementId::Survivor => "Survive for 60 seconds",
            AchievementId::Destroyer => "Destroy 50 enemies",
            AchievementId::AcePilot => "Reach level 5",
            AchievementId::Unstoppable => "Destroy 10 enemies in a row",
        }
    }

    /// Icon name for the presentation layer
    pub fn icon(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "target",
            AchievementId::Survivor => "shield",
            AchievementId::Destroyer => "bomb",
            AchievementId::AcePilot => "star",
            AchievementId::Unstoppable => "zap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub progress: u32,
    pub target: u32,
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(id: AchievementId) -> Self {
        Self {
            id,
            progress: 0,
            target: id.target(),
            unlocked: false,
        }
    }

    /// Record new progress. Returns true if this call unlocked it.
    pub fn record(&mut self, value: u32) -> bool {
        if self.unlocked {
            return false;
        }
        self.progress = value;
        self.unlocked = value >= self.target;
        self.unlocked
    }
}

/// The full achievement set, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    entries: [Achievement; 5],
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            entries: AchievementId::ALL.map(Achievement::new),
        }
    }
}

impl Achievements {
    pub fn get(&self, id: AchievementId) -> &Achievement {
        &self.entries[id.index()]
    }

    /// Apply the update rule; returns true if the achievement was just unlocked
    pub fn record(&mut self, id: AchievementId, value: u32) -> bool {
        self.entries[id.index()].record(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Back to 0 / locked for a new game
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_set() {
        let set = Achievements::default();
        assert_eq!(set.iter().count(), 5);
        assert_eq!(set.get(AchievementId::Survivor).target, 60);
        assert_eq!(set.get(AchievementId::Destroyer).target, 50);
        assert_eq!(set.unlocked_count(), 0);
    }

    #[test]
    fn test_progress_overwrites_until_target() {
        let mut set = Achievements::default();
        assert!(!set.record(AchievementId::Unstoppable, 4));
        assert_eq!(set.get(AchievementId::Unstoppable).progress, 4);

        // Combo reset lowers progress while still locked
        assert!(!set.record(AchievementId::Unstoppable, 1));
        assert_eq!(set.get(AchievementId::Unstoppable).progress, 1);

        assert!(set.record(AchievementId::Unstoppable, 10));
        assert!(set.get(AchievementId::Unstoppable).unlocked);
    }

    #[test]
    fn test_unlocked_is_frozen() {
        let mut set = Achievements::default();
        assert!(set.record(AchievementId::FirstBlood, 1));
        assert!(!set.record(AchievementId::FirstBlood, 0));
        let a = set.get(AchievementId::FirstBlood);
        assert!(a.unlocked);
        assert_eq!(a.progress, 1);
    }

    #[test]
    fn test_reset() {
        let mut set = Achievements::default();
        set.record(AchievementId::AcePilot, 5);
        set.reset();
        assert_eq!(set, Achievements::default());
    }

    proptest! {
        #[test]
        fn prop_unlocked_never_regresses(values in proptest::collection::vec(0u32..100, 1..50)) {
            let mut a = Achievement::new(AchievementId::Survivor);
            let mut was_unlocked = false;
            let mut frozen_progress = 0;
            for v in values {
                a.record(v);
                if was_unlocked {
                    prop_assert!(a.unlocked);
                    prop_assert_eq!(a.progress, frozen_progress);
                } else if a.unlocked {
                    was_unlocked = true;
                    frozen_progress = a.progress;
                }
            }
        }
    }
}
