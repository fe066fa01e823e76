//! Periodic triggers
//!
//! Every recurring job (the simulation tick, spawners, the survival counter
//! and auto-fire) is a `Timer` owned by one `Schedule`. Timers are driven by
//! elapsed play time rather than wall-clock callbacks, so disarming them is
//! a cancellation: a disarmed timer can never fire into a later game.

use crate::consts::*;
use crate::settings::Settings;

/// Which job is due. Variant order breaks ties between simultaneous fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trigger {
    Tick,
    SpawnEnemy,
    SpawnPowerUp,
    SurvivalSecond,
    AutoFire,
}

/// A fixed-period timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    period_us: u64,
    elapsed_us: u64,
    armed: bool,
}

impl Timer {
    /// A disarmed timer
    pub fn new(period_us: u64) -> Self {
        Self {
            period_us: period_us.max(1),
            elapsed_us: 0,
            armed: false,
        }
    }

    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start counting a full period from now
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_us = 0;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_us = 0;
    }

    /// Advance by `dt_us`, returning the offsets into that span at which the
    /// timer fired
    pub fn advance(&mut self, dt_us: u64) -> Vec<u64> {
        if !self.armed {
            return Vec::new();
        }
        let mut fires = Vec::new();
        let mut next = self.period_us - self.elapsed_us;
        while next <= dt_us {
            fires.push(next);
            next += self.period_us;
        }
        self.elapsed_us = (self.elapsed_us + dt_us) % self.period_us;
        fires
    }
}

/// A trigger that came due, stamped with play time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub at_us: u64,
    pub trigger: Trigger,
}

/// All recurring jobs of one game, plus the play clock that drives them
#[derive(Debug, Clone)]
pub struct Schedule {
    clock_us: u64,
    timers: Vec<(Trigger, Timer)>,
    auto_fire: bool,
}

fn ms(value: u32) -> u64 {
    u64::from(value) * 1000
}

impl Schedule {
    pub fn new(settings: &Settings) -> Self {
        let tick_us = 1_000_000 / u64::from(settings.tick_hz.max(1));
        Self {
            clock_us: 0,
            timers: vec![
                (Trigger::Tick, Timer::new(tick_us)),
                (Trigger::SpawnEnemy, Timer::new(ms(ENEMY_SPAWN_PERIOD_MS))),
                (Trigger::SpawnPowerUp, Timer::new(ms(POWERUP_SPAWN_PERIOD_MS))),
                (Trigger::SurvivalSecond, Timer::new(ms(SURVIVAL_PERIOD_MS))),
                (Trigger::AutoFire, Timer::new(ms(AUTO_FIRE_PERIOD_MS))),
            ],
            auto_fire: settings.auto_fire,
        }
    }

    /// Play time (µs) since the last `reset_clock`
    pub fn clock_us(&self) -> u64 {
        self.clock_us
    }

    pub fn reset_clock(&mut self) {
        self.clock_us = 0;
    }

    /// Arm every job from a fresh phase, cancelling whatever was running
    pub fn arm_all(&mut self) {
        let auto_fire = self.auto_fire;
        for (trigger, timer) in &mut self.timers {
            if *trigger == Trigger::AutoFire && !auto_fire {
                timer.disarm();
            } else {
                timer.arm();
            }
        }
    }

    pub fn disarm_all(&mut self) {
        for (_, timer) in &mut self.timers {
            timer.disarm();
        }
    }

    pub fn is_armed(&self, trigger: Trigger) -> bool {
        self.timers
            .iter()
            .any(|(t, timer)| *t == trigger && timer.is_armed())
    }

    /// True if no job is armed
    pub fn is_idle(&self) -> bool {
        self.timers.iter().all(|(_, timer)| !timer.is_armed())
    }

    /// Advance play time and list what came due, earliest first.
    /// The clock only runs while something is armed.
    pub fn advance(&mut self, dt_us: u64) -> Vec<Fired> {
        if self.is_idle() {
            return Vec::new();
        }
        let start = self.clock_us;
        let mut fired: Vec<Fired> = self
            .timers
            .iter_mut()
            .flat_map(|(trigger, timer)| {
                let trigger = *trigger;
                timer.advance(dt_us).into_iter().map(move |offset| Fired {
                    at_us: start + offset,
                    trigger,
                })
            })
            .collect();
        fired.sort_by_key(|f| (f.at_us, f.trigger));
        self.clock_us += dt_us;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fired: &[Fired], trigger: Trigger) -> usize {
        fired.iter().filter(|f| f.trigger == trigger).count()
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = Timer::new(10);
        assert!(timer.advance(1000).is_empty());
    }

    #[test]
    fn test_timer_fires_each_period() {
        let mut timer = Timer::new(10);
        timer.arm();
        assert!(timer.advance(9).is_empty());
        assert_eq!(timer.advance(1), vec![1]);
        assert_eq!(timer.advance(25), vec![10, 20]);
        // 5 µs carried over
        assert_eq!(timer.advance(5), vec![5]);
    }

    #[test]
    fn test_rearm_restarts_phase() {
        let mut timer = Timer::new(10);
        timer.arm();
        timer.advance(8);
        timer.arm();
        assert!(timer.advance(8).is_empty());
        assert_eq!(timer.advance(2), vec![2]);
    }

    #[test]
    fn test_schedule_one_second() {
        let mut schedule = Schedule::new(&Settings::default());
        schedule.arm_all();
        let fired = schedule.advance(1_000_000);

        assert_eq!(count(&fired, Trigger::Tick), 60);
        assert_eq!(count(&fired, Trigger::SurvivalSecond), 1);
        assert_eq!(count(&fired, Trigger::AutoFire), 5);
        assert_eq!(count(&fired, Trigger::SpawnEnemy), 0);
        assert_eq!(schedule.clock_us(), 1_000_000);

        // Sorted by time, ties in trigger order
        assert!(fired.windows(2).all(|w| (w[0].at_us, w[0].trigger) <= (w[1].at_us, w[1].trigger)));
    }

    #[test]
    fn test_simultaneous_fires_tick_first() {
        let settings = Settings {
            tick_hz: 1,
            ..Settings::default()
        };
        let mut schedule = Schedule::new(&settings);
        schedule.arm_all();
        let fired = schedule.advance(1_000_000);
        let at_end: Vec<_> = fired
            .iter()
            .filter(|f| f.at_us == 1_000_000)
            .map(|f| f.trigger)
            .collect();
        assert_eq!(at_end, vec![Trigger::Tick, Trigger::SurvivalSecond, Trigger::AutoFire]);
    }

    #[test]
    fn test_disarm_all_stops_clock() {
        let mut schedule = Schedule::new(&Settings::default());
        schedule.arm_all();
        schedule.advance(500_000);
        schedule.disarm_all();
        assert!(schedule.is_idle());
        assert!(schedule.advance(10_000_000).is_empty());
        assert_eq!(schedule.clock_us(), 500_000);
    }

    #[test]
    fn test_auto_fire_can_be_disabled() {
        let settings = Settings {
            auto_fire: false,
            ..Settings::default()
        };
        let mut schedule = Schedule::new(&settings);
        schedule.arm_all();
        assert!(!schedule.is_armed(Trigger::AutoFire));
        assert!(schedule.is_armed(Trigger::Tick));
        let fired = schedule.advance(1_000_000);
        assert_eq!(count(&fired, Trigger::AutoFire), 0);
    }
}
