//! Reconciliation window model.
//!
//! This module contains the [`ReconciliationWindow`] type, the half-open
//! `[start, end)` interval a variance report covers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The half-open interval `[start, end)` a report covers.
///
/// The engine has no notion of calendars or time zones; the caller picks
/// instants that match the business's pay period.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ReconciliationWindow;
/// use chrono::{TimeZone, Utc};
///
/// let window = ReconciliationWindow::new(
///     Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 19, 0, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// assert!(window.contains(window.start));
/// assert!(!window.contains(window.end));
/// assert_eq!(window.length_days(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ReconciliationWindow {
    /// The first instant inside the window.
    pub start: DateTime<Utc>,
    /// The first instant after the window.
    pub end: DateTime<Utc>,
}

impl ReconciliationWindow {
    /// Creates a window, rejecting one whose end is not after its start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> EngineResult<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Checks that `end` lies after `start`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end <= self.start {
            return Err(EngineError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Returns true when `at` falls inside `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// Returns the window length in whole days, rounding partial days up.
    pub fn length_days(&self) -> i64 {
        let seconds = (self.end - self.start).num_seconds();
        if seconds <= 0 {
            return 0;
        }
        (seconds + 86_399) / 86_400
    }
}

/// Unvalidated bounds as they appear on the wire.
#[derive(Deserialize)]
struct WindowBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<WindowBounds> for ReconciliationWindow {
    type Error = EngineError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        ReconciliationWindow::new(bounds.start, bounds.end)
    }
}
