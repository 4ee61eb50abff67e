use std::time::{Duration, Instant};

pub const DEFAULT_WHEEL_DEBOUNCE: Duration = Duration::from_millis(200);

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Lets one wheel-driven step through per window so a single physical
/// gesture cannot produce several steps.
#[derive(Debug, Clone, Copy)]
pub struct WheelGate {
    window: Duration,
    locked_until: Option<Instant>,
}

impl Default for WheelGate {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_DEBOUNCE)
    }
}

impl WheelGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            locked_until: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn try_pass(&mut self, now: Instant) -> bool {
        if self.is_locked(now) {
            return false;
        }
        self.locked_until = Some(now + self.window);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_event_inside_window_is_suppressed() {
        let start = Instant::now();
        let mut gate = WheelGate::default();

        assert!(gate.try_pass(start));
        assert!(!gate.try_pass(start + Duration::from_millis(50)));
        assert!(!gate.try_pass(start + Duration::from_millis(199)));
        assert!(gate.try_pass(start + Duration::from_millis(200)));
    }

    #[test]
    fn suppressed_events_do_not_extend_the_window() {
        let start = Instant::now();
        let mut gate = WheelGate::new(Duration::from_millis(100));

        assert!(gate.try_pass(start));
        assert!(!gate.try_pass(start + Duration::from_millis(90)));
        assert!(gate.try_pass(start + Duration::from_millis(110)));
    }
}
