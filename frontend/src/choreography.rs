//! Scroll choreography: smoothed scrolling, offset-window triggers, pinned
//! horizontal tracks and breakpoint-scoped effect sets.
//!
//! Pages describe their effects as a [`Score`]; [`Choreography::mount`]
//! owns everything the score acquires and releases it on `destroy`.

pub mod engine;
pub mod error;
pub mod hook;
pub mod pinned_track;
pub mod pose;
pub mod responsive;
pub mod scheduler;
pub mod scope;
pub mod smooth_scroll;
pub mod surface;
pub mod timeline;
pub mod triggers;
pub mod web;

#[cfg(test)]
pub mod testing;

pub use engine::{Choreography, Score, Stage};
pub use error::Result;
pub use hook::use_choreography;
pub use pinned_track::PinnedTrackSpec;
pub use pose::{Ease, Pose};
pub use responsive::BreakpointMode;
pub use timeline::{Timeline, Tween};
pub use triggers::Anchor;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoreographyConfig {
    pub smooth_duration_secs: f64,
    pub breakpoint_px: f64,
    pub wheel_multiplier: f64,
    pub resize_debounce_ms: u32,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            smooth_duration_secs: config::SMOOTH_SCROLL_DURATION_SECS,
            breakpoint_px: config::BREAKPOINT_PX,
            wheel_multiplier: config::WHEEL_MULTIPLIER,
            resize_debounce_ms: config::RESIZE_DEBOUNCE_MS,
        }
    }
}
