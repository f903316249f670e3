//! Launch timing: periodic automatic launches and debounced manual launches

use std::time::Duration;

use glam::Vec2;

/// Outcome of a manual launch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Stored in the empty pending slot
    Queued,
    /// Overwrote an earlier pending request
    Replaced,
    /// Forced request appended immediately
    Launched,
    /// Manual launches disabled, or no viewport for a forced launch
    Dropped,
}

/// Timers for both spawn channels
///
/// Timestamps are measured on the host's elapsed-since-start clock.
#[derive(Debug, Clone)]
pub struct Spawner {
    auto_launch_interval: Duration,
    manual_spawn_timeout: Duration,
    last_auto_launch: Duration,
    last_manual_spawn: Duration,
    /// Target of the manual rocket awaiting its debounce window
    pending: Option<Vec2>,
}

impl Spawner {
    pub fn new(auto_launch_interval: Duration, manual_spawn_timeout: Duration) -> Self {
        Self {
            auto_launch_interval,
            manual_spawn_timeout,
            last_auto_launch: Duration::ZERO,
            last_manual_spawn: Duration::ZERO,
            pending: None,
        }
    }

    pub fn auto_enabled(&self) -> bool {
        !self.auto_launch_interval.is_zero()
    }

    pub fn manual_enabled(&self) -> bool {
        !self.manual_spawn_timeout.is_zero()
    }

    /// Whether an automatic launch is due; records the launch time if so
    pub fn poll_auto(&mut self, elapsed: Duration) -> bool {
        if !self.auto_enabled() {
            return false;
        }
        if elapsed.saturating_sub(self.last_auto_launch) >= self.auto_launch_interval {
            self.last_auto_launch = elapsed;
            return true;
        }
        false
    }

    /// Store a manual launch target, overwriting any pending one
    pub fn request(&mut self, target: Vec2) -> LaunchRequest {
        if !self.manual_enabled() {
            return LaunchRequest::Dropped;
        }
        match self.pending.replace(target) {
            Some(_) => LaunchRequest::Replaced,
            None => LaunchRequest::Queued,
        }
    }

    /// Take the pending target once the debounce window has passed
    pub fn take_due_manual(&mut self, elapsed: Duration) -> Option<Vec2> {
        if !self.manual_enabled() || self.pending.is_none() {
            return None;
        }
        if elapsed.saturating_sub(self.last_manual_spawn) >= self.manual_spawn_timeout {
            self.last_manual_spawn = elapsed;
            return self.pending.take();
        }
        None
    }

    pub fn pending(&self) -> Option<Vec2> {
        self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn last_auto_launch(&self) -> Duration {
        self.last_auto_launch
    }

    pub fn last_manual_spawn(&self) -> Duration {
        self.last_manual_spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_auto_launch_period() {
        let mut spawner = Spawner::new(ms(1000), ms(420));
        assert!(!spawner.poll_auto(ms(999)));
        assert!(spawner.poll_auto(ms(1000)));
        assert!(!spawner.poll_auto(ms(1500)));
        assert!(spawner.poll_auto(ms(2016)));
        assert_eq!(spawner.last_auto_launch(), ms(2016));
    }

    #[test]
    fn test_auto_disabled() {
        let mut spawner = Spawner::new(Duration::ZERO, ms(420));
        assert!(!spawner.poll_auto(ms(100_000)));
    }

    #[test]
    fn test_manual_debounce_overwrites() {
        let mut spawner = Spawner::new(ms(1000), ms(420));
        assert_eq!(spawner.request(Vec2::new(1.0, 1.0)), LaunchRequest::Queued);
        assert_eq!(spawner.request(Vec2::new(2.0, 2.0)), LaunchRequest::Replaced);

        assert_eq!(spawner.take_due_manual(ms(100)), None);
        assert_eq!(spawner.take_due_manual(ms(420)), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(spawner.take_due_manual(ms(2000)), None);

        spawner.request(Vec2::ZERO);
        assert_eq!(spawner.take_due_manual(ms(600)), None);
        assert_eq!(spawner.take_due_manual(ms(840)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_manual_disabled_drops_requests() {
        let mut spawner = Spawner::new(ms(1000), Duration::ZERO);
        assert_eq!(spawner.request(Vec2::ONE), LaunchRequest::Dropped);
        assert_eq!(spawner.pending(), None);
        assert_eq!(spawner.take_due_manual(ms(10_000)), None);
    }
}
