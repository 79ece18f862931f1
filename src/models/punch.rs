//! Punch event model.
//!
//! This module defines the [`PunchEvent`] row submitted by staff at the time
//! clock and the [`PunchAction`] it records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reconciliation::parse_timestamp;

use super::{StaffIdentity, lenient};

/// The action a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchAction {
    /// Start of a working session.
    ClockIn,
    /// Start of a break.
    BreakOut,
    /// End of a break.
    BreakIn,
    /// End of a working session.
    ClockOut,
    /// Any action the time clock may emit that the engine does not know.
    /// Treated as a no-op.
    #[serde(other)]
    Unrecognized,
}

impl PunchAction {
    /// Tie-break rank for punches sharing the same instant.
    pub(crate) fn rank(self) -> u8 {
        match self {
            PunchAction::ClockIn => 0,
            PunchAction::BreakOut => 1,
            PunchAction::BreakIn => 2,
            PunchAction::ClockOut => 3,
            PunchAction::Unrecognized => 4,
        }
    }
}

/// One staff action at the time clock.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchAction, PunchEvent, StaffIdentity};
///
/// let punch = PunchEvent {
///     identity: StaffIdentity::new(None, Some("4321")),
///     action: PunchAction::ClockIn,
///     at: Some("2026-01-13T09:00:00Z".to_string()),
/// };
/// assert!(punch.timestamp().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Who punched.
    #[serde(flatten)]
    pub identity: StaffIdentity,
    /// What was punched.
    pub action: PunchAction,
    /// When it was punched, as an ISO instant. Null or non-text values
    /// arrive as `None` and the punch is skipped.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub at: Option<String>,
}

impl PunchEvent {
    /// Returns the parsed punch time, or `None` if it is malformed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.at.as_deref()?)
    }
}
