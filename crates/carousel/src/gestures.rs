//! Translation of raw wheel, pointer and key input into discrete directions.

use serde::{Deserialize, Serialize};

use crate::stepper::Direction;

pub const MIN_WHEEL_MAGNITUDE: f64 = 1.0;
pub const MIN_DRAG_DISTANCE: f64 = 30.0;
pub const DRAG_PITCH_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Uses the dominant axis; vertical wins ties.
pub fn wheel_direction(delta: WheelDelta) -> Option<Direction> {
    let value = if delta.dy.abs() >= delta.dx.abs() {
        delta.dy
    } else {
        delta.dx
    };
    if !value.is_finite() || value.abs() < MIN_WHEEL_MAGNITUDE {
        return None;
    }
    Some(if value > 0.0 {
        Direction::Forward
    } else {
        Direction::Backward
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

pub fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowRight => Some(Direction::Forward),
        Key::ArrowLeft => Some(Direction::Backward),
        Key::Other => None,
    }
}

pub fn drag_threshold(pitch: f64) -> f64 {
    let scaled = if pitch.is_finite() {
        pitch * DRAG_PITCH_FRACTION
    } else {
        0.0
    };
    scaled.max(MIN_DRAG_DISTANCE)
}

/// Net horizontal displacement of one pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    start_x: Option<f64>,
    total_dx: f64,
}

impl DragTracker {
    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.start_x = Some(x);
        self.total_dx = 0.0;
    }

    pub fn pointer_move(&mut self, x: f64) {
        if let Some(start) = self.start_x {
            self.total_dx = x - start;
        }
    }

    /// Ends the gesture. Dragging content left advances; short drags snap back.
    pub fn pointer_up(&mut self, pitch: f64) -> Option<Direction> {
        self.start_x.take()?;
        let dx = std::mem::take(&mut self.total_dx);
        if dx.abs() <= drag_threshold(pitch) {
            return None;
        }
        Some(if dx < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        })
    }

    pub fn cancel(&mut self, pitch: f64) -> Option<Direction> {
        self.pointer_up(pitch)
    }
}
