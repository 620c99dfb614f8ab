//! Caller-clocked animation primitives.
//!
//! Charts own one [`TimedScalar`] per animated element. Nothing here reads a
//! wall clock: hosts call `advance` from their frame callback, which keeps
//! animation deterministic and testable.

mod easing;
mod scalar;

pub use easing::Easing;
pub use scalar::{AnimatedScalar, ScalarObserver, TimedScalar};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Duration + easing pair shared by every transition a chart starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationConfig {
    #[must_use]
    pub const fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Config that completes every transition on the next write.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(0, Easing::Linear)
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(1_000, Easing::EaseOutCubic)
    }
}
