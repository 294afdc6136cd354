//! Simulation tuning
//!
//! Geometry, speeds and scoring constants in one serializable struct, loaded
//! from JSON when present. The struct travels inside `GameState` so the
//! reducer stays a function of `(state, action)` only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Tick interval in milliseconds
    pub tick_rate_ms: u32,

    // === Geometry ===
    /// Viewport width (horizontal placement is a fraction of this)
    pub viewport_width: f32,
    /// Viewport height
    pub viewport_height: f32,
    /// Vertical position of the judgement line
    pub judgement_line: f32,
    /// Short entity radius
    pub note_radius: f32,
    /// Sustain tail width
    pub tail_width: f32,

    // === Motion ===
    /// Fall distance per tick
    pub step_size: f32,
    /// Scales note duration into tail length
    pub interval_duration: f32,

    // === Judgement ===
    /// Max |y - judgement_line| for a key press to hit
    pub tolerance: f32,
    /// Notes longer than this many seconds spawn a sustain tail
    pub long_note_secs: f32,

    // === Scoring ===
    /// Consecutive hits per multiplier step
    pub streak_window: u32,
    /// Multiplier gain per completed window
    pub multiplier_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate_ms: TICK_RATE_MS,

            viewport_width: CANVAS_WIDTH,
            viewport_height: CANVAS_HEIGHT,
            judgement_line: TARGET_POSITION,
            note_radius: NOTE_RADIUS,
            tail_width: TAIL_WIDTH,

            step_size: STEP_SIZE,
            interval_duration: INTERVAL_DURATION,

            tolerance: TOLERANCE,
            long_note_secs: LONG_NOTE_SECS,

            streak_window: STREAK_WINDOW,
            multiplier_step: MULTIPLIER_STEP,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive"));
        }
        if self.step_size <= 0.0 {
            return Err(ConfigError::Invalid("step_size must be positive"));
        }
        if self.tolerance < 0.0 {
            return Err(ConfigError::Invalid("tolerance must not be negative"));
        }
        if self.streak_window == 0 {
            return Err(ConfigError::Invalid("streak_window must be positive"));
        }
        Ok(())
    }

    /// Convert a tick count into elapsed milliseconds
    pub fn ticks_to_ms(&self, ticks: u64) -> u64 {
        ticks * u64::from(self.tick_rate_ms)
    }

    /// Number of ticks a short entity needs to fall from spawn to the line
    pub fn ticks_to_line(&self) -> u64 {
        (self.judgement_line / self.step_size).ceil() as u64
    }
}
