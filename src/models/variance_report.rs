//! Variance report models.
//!
//! This module contains the [`VarianceReport`] type and its associated
//! structures: one [`VarianceRow`] per staff key, aggregated totals, and
//! warnings describing input rows the engine had to skip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReconciliationWindow, StaffKey};

/// Scheduled versus actual minutes for one staff key over a window.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{StaffKey, VarianceRow};
///
/// let row = VarianceRow::new(
///     StaffKey::Account { account_id: "acct-1".to_string() },
///     "Ana".to_string(),
///     480,
///     450,
/// );
/// assert_eq!(row.variance_minutes, -30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceRow {
    /// The identity the row is for.
    pub staff_key: StaffKey,
    /// The resolved display label.
    pub label: String,
    /// Break-adjusted scheduled minutes.
    pub scheduled_minutes: i64,
    /// Reconstructed worked minutes.
    pub actual_minutes: i64,
    /// `actual_minutes - scheduled_minutes`.
    pub variance_minutes: i64,
}

impl VarianceRow {
    /// Creates a row, deriving the variance.
    pub fn new(
        staff_key: StaffKey,
        label: String,
        scheduled_minutes: i64,
        actual_minutes: i64,
    ) -> Self {
        Self {
            staff_key,
            label,
            scheduled_minutes,
            actual_minutes,
            variance_minutes: actual_minutes - scheduled_minutes,
        }
    }
}

/// Converts minutes to hours, rounded to two decimal places.
///
/// ```
/// use attendance_engine::models::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(450), Decimal::new(750, 2));
/// assert_eq!(minutes_to_hours(-20), Decimal::new(-33, 2));
/// ```
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::new(minutes, 0) / Decimal::new(60, 0)).round_dp(2)
}

/// Aggregated totals across all rows of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Number of staff rows.
    pub staff_count: usize,
    /// Sum of scheduled minutes.
    pub scheduled_minutes: i64,
    /// Sum of actual minutes.
    pub actual_minutes: i64,
    /// Sum of variance minutes.
    pub variance_minutes: i64,
    /// Scheduled minutes expressed in hours.
    pub scheduled_hours: Decimal,
    /// Actual minutes expressed in hours.
    pub actual_hours: Decimal,
    /// Variance minutes expressed in hours.
    pub variance_hours: Decimal,
}

impl ReportTotals {
    /// Sums a set of rows.
    pub fn from_rows(rows: &[VarianceRow]) -> Self {
        let scheduled_minutes: i64 = rows.iter().map(|r| r.scheduled_minutes).sum();
        let actual_minutes: i64 = rows.iter().map(|r| r.actual_minutes).sum();
        let variance_minutes = actual_minutes - scheduled_minutes;

        Self {
            staff_count: rows.len(),
            scheduled_minutes,
            actual_minutes,
            variance_minutes,
            scheduled_hours: minutes_to_hours(scheduled_minutes),
            actual_hours: minutes_to_hours(actual_minutes),
            variance_hours: minutes_to_hours(variance_minutes),
        }
    }
}

/// A note about input the engine could not use.
///
/// Warnings never fail a report; they explain why a total may be lower than
/// expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium").
    pub severity: String,
}

impl ReconciliationWarning {
    /// Warning code for a shift with an unparsable timestamp.
    pub const MALFORMED_SHIFT: &'static str = "MALFORMED_SHIFT";
    /// Warning code for a punch with an unparsable timestamp.
    pub const MALFORMED_PUNCH: &'static str = "MALFORMED_PUNCH";

    /// Creates a low-severity warning.
    pub fn low(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: "low".to_string(),
        }
    }
}

/// The complete result of a variance reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The window the report covers.
    pub window: ReconciliationWindow,
    /// One row per staff key, sorted by label.
    pub rows: Vec<VarianceRow>,
    /// Aggregated totals.
    pub totals: ReportTotals,
    /// Input rows that were skipped.
    pub warnings: Vec<ReconciliationWarning>,
    /// The reconciliation duration in microseconds.
    pub duration_us: u64,
}
