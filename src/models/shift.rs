//! Scheduled shift model.
//!
//! This module defines the [`ScheduledShift`] row as delivered by the
//! scheduling backend. Timestamps stay in their raw text form until the
//! engine parses them, so a single malformed row can be skipped without
//! rejecting the whole collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reconciliation::{parse_timestamp, rounded_minutes};

use super::{StaffIdentity, lenient};

/// A planned work interval for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// Backend identifier of the shift, used only in diagnostics.
    #[serde(default)]
    pub id: Option<String>,
    /// Who the shift is scheduled for.
    #[serde(flatten)]
    pub identity: StaffIdentity,
    /// When the shift starts, as an ISO instant.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub starts_at: Option<String>,
    /// When the shift ends, as an ISO instant. Open shifts arrive without one.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub ends_at: Option<String>,
    /// Unpaid break minutes, subtracted flatly from the interval.
    #[serde(default)]
    pub break_minutes: Option<u32>,
}

impl ScheduledShift {
    /// Returns the parsed `(start, end)` pair, or `None` if either timestamp
    /// is malformed.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_timestamp(self.starts_at.as_deref()?)?;
        let end = parse_timestamp(self.ends_at.as_deref()?)?;
        Some((start, end))
    }

    /// Returns the break-adjusted scheduled minutes, never below zero, or
    /// `None` if the shift's timestamps are malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{ScheduledShift, StaffIdentity};
    ///
    /// let shift = ScheduledShift {
    ///     id: None,
    ///     identity: StaffIdentity::new(Some("acct-1"), None),
    ///     starts_at: Some("2026-01-13T09:00:00Z".to_string()),
    ///     ends_at: Some("2026-01-13T17:30:00Z".to_string()),
    ///     break_minutes: Some(30),
    /// };
    /// assert_eq!(shift.scheduled_minutes(), Some(480));
    /// ```
    pub fn scheduled_minutes(&self) -> Option<i64> {
        let (start, end) = self.interval()?;
        let breaks = i64::from(self.break_minutes.unwrap_or(0));
        Some((rounded_minutes(start, end) - breaks).max(0))
    }
}
