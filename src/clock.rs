use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Paused,
}

/// Gates generation steps to a fixed wall-clock interval.
///
/// Times are durations since the control loop started, so the clock itself
/// never reads the system time.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    pub last_tick: Duration,
    pub interval: Duration,
    state: ClockState,
}

impl SimulationClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            last_tick: Duration::ZERO,
            interval,
            state: ClockState::Running,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    /// Running -> Paused or Paused -> Running. Returns the new state.
    pub fn toggle_pause(&mut self) -> ClockState {
        self.state = match self.state {
            ClockState::Running => ClockState::Paused,
            ClockState::Paused => ClockState::Running,
        };
        self.state
    }

    /// True exactly when running and strictly more than one interval has
    /// passed since the last successful tick. A successful tick moves
    /// `last_tick` to `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.state == ClockState::Paused {
            return false;
        }
        if now.saturating_sub(self.last_tick) > self.interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_running() {
        let clock = SimulationClock::new(ms(500));
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.last_tick, Duration::ZERO);
    }

    #[test]
    fn tick_requires_strictly_more_than_interval() {
        let mut clock = SimulationClock::new(ms(500));
        assert!(!clock.tick(ms(100)));
        assert!(!clock.tick(ms(500)));
        assert!(clock.tick(ms(501)));
        assert_eq!(clock.last_tick, ms(501));
    }

    #[test]
    fn successful_tick_resets_the_window() {
        let mut clock = SimulationClock::new(ms(500));
        assert!(clock.tick(ms(600)));
        assert!(!clock.tick(ms(900)));
        assert!(!clock.tick(ms(1100)));
        assert!(clock.tick(ms(1101)));
    }

    #[test]
    fn paused_clock_never_ticks() {
        let mut clock = SimulationClock::new(ms(500));
        assert_eq!(clock.toggle_pause(), ClockState::Paused);
        for t in [0, 501, 10_000, 1_000_000] {
            assert!(!clock.tick(ms(t)));
        }
        assert_eq!(clock.last_tick, Duration::ZERO);
    }

    #[test]
    fn resume_obeys_interval_again() {
        let mut clock = SimulationClock::new(ms(500));
        assert!(clock.tick(ms(501)));
        clock.toggle_pause();
        assert!(!clock.tick(ms(2_000)));
        assert_eq!(clock.toggle_pause(), ClockState::Running);
        assert!(clock.tick(ms(2_000)));
        assert!(!clock.tick(ms(2_400)));
    }

    #[test]
    fn time_going_backwards_does_not_tick() {
        let mut clock = SimulationClock::new(ms(500));
        assert!(clock.tick(ms(1_000)));
        assert!(!clock.tick(ms(10)));
    }
}
