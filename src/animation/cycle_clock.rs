//! Elapsed time → position inside a repeating cycle.
//!
//! Cycles follow each other without a gap: the instant a cycle ends is the instant the
//! next one starts, so the ratio sweeps `0 → 1` with linear easing and wraps back to `0`.
//! The arithmetic runs on integer nanoseconds, so cycle boundaries do not drift however
//! long the animation has been running.
use std::time::Duration;

use crate::{constants::Ratio, starpath_errors::StarpathError};

/// Where an instant falls in the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    /// Number of cycles completed before this instant.
    pub cycle: u64,
    /// Fraction of the current cycle elapsed, `[0, 1)`.
    pub ratio: Ratio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleClock {
    period: Duration,
}

impl CycleClock {
    /// Arguments
    /// -----------------
    /// * `period` – Length of one cycle; must be non-zero.
    pub fn new(period: Duration) -> Result<Self, StarpathError> {
        if period.is_zero() {
            return Err(StarpathError::InvalidConfig(
                "animation cycle must last longer than zero".to_string(),
            ));
        }
        Ok(CycleClock { period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Position of `elapsed` (time since the animation started).
    pub fn position(&self, elapsed: Duration) -> CyclePosition {
        let period = self.period.as_nanos();
        let elapsed = elapsed.as_nanos();
        CyclePosition {
            cycle: (elapsed / period) as u64,
            ratio: (elapsed % period) as f64 / period as f64,
        }
    }
}
