//! Formatting helpers for the clock, weather and task cards.

pub mod clock;
pub mod icons;
pub mod tasks;
pub mod weather;
