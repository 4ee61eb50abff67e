//! Discrete carousel navigation: pointer, wheel and key input become single,
//! clamped page steps over a card list.

pub mod debounce;
pub mod gestures;
pub mod stepper;

use std::time::Duration;

use shared::protocol::ScrollCommand;
use tracing::{debug, warn};

pub use debounce::{Clock, SystemClock, WheelGate};
pub use gestures::{DragTracker, Key, WheelDelta};
pub use stepper::{go_to, index_for_offset, step, Direction, StepperState};

/// Input-session state around the stepper. Geometry is not stored; every
/// handler takes a fresh `StepperState` read from layout.
#[derive(Debug)]
pub struct Carousel<C: Clock = SystemClock> {
    clock: C,
    wheel_gate: WheelGate,
    drag: DragTracker,
}

impl Default for Carousel<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock, debounce::DEFAULT_WHEEL_DEBOUNCE)
    }
}

impl<C: Clock> Carousel<C> {
    pub fn new(clock: C, wheel_debounce: Duration) -> Self {
        Self {
            clock,
            wheel_gate: WheelGate::new(wheel_debounce),
            drag: DragTracker::default(),
        }
    }

    pub fn on_wheel(&mut self, state: &StepperState, delta: WheelDelta) -> Option<ScrollCommand> {
        let direction = gestures::wheel_direction(delta)?;
        if let Err(err) = state.validate() {
            warn!(%err, "ignoring wheel step");
            return None;
        }
        if !self.wheel_gate.try_pass(self.clock.now()) {
            debug!("wheel step suppressed inside debounce window");
            return None;
        }
        self.step(state, direction)
    }

    pub fn on_key(&mut self, state: &StepperState, key: Key) -> Option<ScrollCommand> {
        let direction = gestures::key_direction(key)?;
        self.step(state, direction)
    }

    pub fn on_pointer_down(&mut self, x: f64) {
        self.drag.pointer_down(x);
    }

    pub fn on_pointer_move(&mut self, x: f64) {
        self.drag.pointer_move(x);
    }

    pub fn on_pointer_up(&mut self, state: &StepperState) -> Option<ScrollCommand> {
        let direction = self.drag.pointer_up(state.pitch)?;
        self.step(state, direction)
    }

    /// The browser aborted the gesture; it still counts as a release.
    pub fn on_pointer_cancel(&mut self, state: &StepperState) -> Option<ScrollCommand> {
        let direction = self.drag.cancel(state.pitch)?;
        self.step(state, direction)
    }

    pub fn go_to(&self, state: &StepperState, target: i64) -> Option<ScrollCommand> {
        if let Err(err) = state.validate() {
            warn!(%err, "ignoring carousel jump");
            return None;
        }
        Some(scroll_command(&go_to(state, target)))
    }

    fn step(&self, state: &StepperState, direction: Direction) -> Option<ScrollCommand> {
        if let Err(err) = state.validate() {
            warn!(%err, "ignoring carousel step");
            return None;
        }
        let next = step(state, direction);
        debug!(
            from = state.current_index,
            to = next.current_index,
            max = next.max_index(),
            "carousel step"
        );
        Some(scroll_command(&next))
    }
}

pub fn scroll_command(state: &StepperState) -> ScrollCommand {
    ScrollCommand {
        index: state.current_index,
        offset: state.scroll_offset(),
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
