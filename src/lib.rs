//! Beatfall - falling-note rhythm game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, judgement, scoring, reducer)
//! - `schedule`: Song schedule loading from the tabular note format
//! - `session`: Fixed-rate driver that folds spawns, ticks and key presses
//! - `cue`: Sound cues derived from each reduction's resolved output
//! - `settings`: Data-driven tuning (judgement line, speeds, tolerances)

pub mod cue;
pub mod error;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, ScheduleError};
pub use schedule::Schedule;
pub use session::Session;
pub use settings::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed tick interval in milliseconds
    pub const TICK_RATE_MS: u32 = 10;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions
    pub const CANVAS_WIDTH: f32 = 200.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Vertical position of the judgement line
    pub const TARGET_POSITION: f32 = 350.0;
    /// Vertical distance every entity falls per tick
    pub const STEP_SIZE: f32 = 2.0;
    /// Scales note duration into sustain tail length
    pub const INTERVAL_DURATION: f32 = 10.0;
    /// Max distance from the judgement line for a press to count
    pub const TOLERANCE: f32 = 20.0;

    /// Short entity radius
    pub const NOTE_RADIUS: f32 = 0.07 * CANVAS_WIDTH;
    /// Sustain tail width (also its horizontal offset, in percent of width / 4)
    pub const TAIL_WIDTH: f32 = 15.0;

    /// Notes longer than this (seconds) get a sustain tail
    pub const LONG_NOTE_SECS: f32 = 1.0;

    /// Consecutive hits needed for one multiplier step
    pub const STREAK_WINDOW: u32 = 10;
    /// Multiplier increase per completed streak window
    pub const MULTIPLIER_STEP: f32 = 0.2;
}

/// Round to one decimal place (multiplier display precision)
#[inline]
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
