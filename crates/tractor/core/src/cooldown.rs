//! Keyed cooldowns measured in simulation time.

use std::collections::HashMap;
use std::time::Duration;

use crate::state::SimTime;

/// Per-key minimum-delay gate.
///
/// Attachments use this for sub-behaviors that must not fire every dispatch,
/// e.g. one animal should not be milked again a tick later. Timestamps are
/// simulation time, so a paused game does not burn through cooldowns.
#[derive(Clone, Debug, Default)]
pub struct CooldownTracker {
    started: HashMap<String, SimTime>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the cooldown for `key` if it is not running.
    ///
    /// Returns true and records `now` when no entry exists or at least
    /// `delay` has elapsed since the recorded start. Otherwise returns false
    /// and leaves the recorded start untouched.
    pub fn try_start(&mut self, key: &str, delay: Duration, now: SimTime) -> bool {
        match self.started.get_mut(key) {
            Some(started) if now.since(*started) < delay => false,
            Some(started) => {
                *started = now;
                true
            }
            None => {
                self.started.insert(key.to_owned(), now);
                true
            }
        }
    }

    /// Returns true if `key` is still cooling down at `now`.
    pub fn is_cooling(&self, key: &str, delay: Duration, now: SimTime) -> bool {
        self.started
            .get(key)
            .is_some_and(|started| now.since(*started) < delay)
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.started.clear();
    }

    pub fn len(&self) -> usize {
        self.started.len()
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_per_window() {
        let mut cooldowns = CooldownTracker::new();
        assert!(cooldowns.try_start("cow", DELAY, SimTime::from_millis(1_000)));
        assert!(!cooldowns.try_start("cow", DELAY, SimTime::from_millis(1_000)));
        assert!(!cooldowns.try_start("cow", DELAY, SimTime::from_millis(1_499)));
        assert!(cooldowns.try_start("cow", DELAY, SimTime::from_millis(1_500)));
        assert!(!cooldowns.try_start("cow", DELAY, SimTime::from_millis(1_900)));
        assert!(cooldowns.try_start("cow", DELAY, SimTime::from_millis(2_000)));
    }

    #[test]
    fn rejected_attempts_do_not_extend_the_window() {
        let mut cooldowns = CooldownTracker::new();
        assert!(cooldowns.try_start("sheep", DELAY, SimTime::from_millis(0)));
        for millis in (50..500).step_by(50) {
            assert!(!cooldowns.try_start("sheep", DELAY, SimTime::from_millis(millis)));
        }
        assert!(cooldowns.try_start("sheep", DELAY, SimTime::from_millis(500)));
    }

    #[test]
    fn keys_are_independent() {
        let mut cooldowns = CooldownTracker::new();
        let now = SimTime::from_millis(10);
        assert!(cooldowns.try_start("a", DELAY, now));
        assert!(cooldowns.try_start("b", DELAY, now));
        assert!(!cooldowns.try_start("a", DELAY, now));
        assert!(cooldowns.is_cooling("b", DELAY, now));
    }

    #[test]
    fn paused_simulation_time_keeps_cooldown_running() {
        // Wall-clock time may pass while paused, but simulation time does not.
        let mut cooldowns = CooldownTracker::new();
        let paused_at = SimTime::from_millis(200);
        assert!(cooldowns.try_start("goat", DELAY, paused_at));
        assert!(!cooldowns.try_start("goat", DELAY, paused_at));
        assert!(cooldowns.is_cooling("goat", DELAY, paused_at));
    }

    #[test]
    fn clear_allows_immediate_restart() {
        let mut cooldowns = CooldownTracker::new();
        let now = SimTime::from_millis(5);
        assert!(cooldowns.try_start("cow", DELAY, now));
        cooldowns.clear();
        assert!(cooldowns.is_empty());
        assert!(cooldowns.try_start("cow", DELAY, now));
    }
}
