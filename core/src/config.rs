use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named animation delays hosts can line their own transitions up with.
pub mod delay {
    use core::time::Duration;

    pub const SHORT: Duration = Duration::from_millis(300);
    pub const MEDIUM: Duration = Duration::from_millis(500);
    pub const LARGE: Duration = Duration::from_millis(800);
}

/// How long each timed phase lasts, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// All tiles shown face-up before play starts.
    pub preview_ms: u64,
    /// Mismatched pair stays visible before turning back down.
    pub mismatch_ms: u64,
    /// Cleared grid stays on screen before the level-complete phase.
    pub end_wait_ms: u64,
    /// Level-complete phase before the next level starts.
    pub level_complete_ms: u64,
    /// Announcement before the next level's preview, zero skips the phase.
    pub interstitial_ms: u64,
}

impl Timings {
    pub const fn preview(&self) -> Duration {
        Duration::from_millis(self.preview_ms)
    }

    pub const fn mismatch(&self) -> Duration {
        Duration::from_millis(self.mismatch_ms)
    }

    pub const fn end_wait(&self) -> Duration {
        Duration::from_millis(self.end_wait_ms)
    }

    pub const fn level_complete(&self) -> Duration {
        Duration::from_millis(self.level_complete_ms)
    }

    pub const fn interstitial(&self) -> Duration {
        Duration::from_millis(self.interstitial_ms)
    }

    /// Every phase lasts zero, handy for headless play.
    pub const fn instant() -> Self {
        Self {
            preview_ms: 0,
            mismatch_ms: 0,
            end_wait_ms: 0,
            level_complete_ms: 0,
            interstitial_ms: 0,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            preview_ms: 3000,
            mismatch_ms: delay::SHORT.as_millis() as u64,
            end_wait_ms: 2000,
            level_complete_ms: 2000,
            interstitial_ms: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub timings: Timings,
    /// Levels played on one grid size before it grows by two.
    pub levels_per_step: Level,
}

impl SessionConfig {
    pub fn schedule(&self) -> StepSchedule {
        StepSchedule::new(self.levels_per_step)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            levels_per_step: DEFAULT_LEVELS_PER_STEP,
        }
    }
}
