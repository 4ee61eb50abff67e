use serde::{Deserialize, Serialize};
use shared::error::{CoreError, ErrorCode};

pub const DEFAULT_VISIBLE_COUNT: usize = 4;

/// Ratios this close to a whole number are layout noise, not an extra page.
const PAGE_RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Card-list geometry as read from live layout plus the current page index.
/// Geometry is never cached here; callers pass a fresh read every time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepperState {
    pub current_index: usize,
    pub item_count: usize,
    pub pitch: f64,
    pub viewport_extent: f64,
    pub content_extent: f64,
    pub visible_count: usize,
}

impl StepperState {
    pub fn new(item_count: usize, pitch: f64, viewport_extent: f64, content_extent: f64) -> Self {
        Self {
            current_index: 0,
            item_count,
            pitch,
            viewport_extent,
            content_extent,
            visible_count: DEFAULT_VISIBLE_COUNT,
        }
    }

    pub fn with_index(mut self, current_index: usize) -> Self {
        self.current_index = current_index;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.pitch.is_finite() || self.pitch <= 0.0 {
            return Err(CoreError::new(
                ErrorCode::InvalidGeometry,
                format!("pitch must be positive, got {}", self.pitch),
            ));
        }
        if !self.viewport_extent.is_finite() || !self.content_extent.is_finite() {
            return Err(CoreError::new(
                ErrorCode::InvalidGeometry,
                "extents must be finite",
            ));
        }
        Ok(())
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Larger of the geometry bound and the count bound; 0 for bad geometry.
    pub fn max_index(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let pages = self.max_scroll() / self.pitch;
        let snapped = if (pages - pages.round()).abs() < PAGE_RATIO_TOLERANCE {
            pages.round()
        } else {
            pages.ceil()
        };
        let geometry_bound = snapped as usize;
        let count_bound = self.item_count.saturating_sub(self.visible_count);
        geometry_bound.max(count_bound)
    }

    /// Pixel offset for the current index, never past the end of the content.
    pub fn scroll_offset(&self) -> f64 {
        if self.validate().is_err() {
            return 0.0;
        }
        (self.current_index as f64 * self.pitch).min(self.max_scroll())
    }

    pub fn step(&self, direction: Direction) -> Self {
        step(self, direction)
    }

    pub fn go_to(&self, target: i64) -> Self {
        go_to(self, target)
    }
}

pub fn step(state: &StepperState, direction: Direction) -> StepperState {
    if state.validate().is_err() {
        return *state;
    }
    let current = i64::try_from(state.current_index).unwrap_or(i64::MAX);
    go_to(state, current.saturating_add(direction.delta()))
}

pub fn go_to(state: &StepperState, target: i64) -> StepperState {
    if state.validate().is_err() {
        return *state;
    }
    let max_index = state.max_index();
    let clamped = if target <= 0 {
        0
    } else {
        usize::try_from(target).unwrap_or(usize::MAX).min(max_index)
    };
    StepperState {
        current_index: clamped,
        ..*state
    }
}

/// Nearest index for a live scroll offset.
pub fn index_for_offset(offset: f64, pitch: f64) -> usize {
    if !pitch.is_finite() || pitch <= 0.0 || !offset.is_finite() || offset <= 0.0 {
        return 0;
    }
    (offset / pitch).round() as usize
}

#[cfg(test)]
#[path = "tests/stepper_tests.rs"]
mod tests;
