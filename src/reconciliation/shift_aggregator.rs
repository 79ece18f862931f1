//! Scheduled minute aggregation.
//!
//! Sums the break-adjusted minutes implied by the schedule for each staff
//! key, counting only shifts whose start falls inside the window.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{ReconciliationWarning, ReconciliationWindow, ScheduledShift, StaffKey};

use super::staff_key::resolve_staff_key;
use super::time::quoted;

/// Scheduled minutes per staff key, plus warnings for skipped shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftAggregation {
    /// Scheduled minutes per key. Every key with a well-formed shift has an
    /// entry, zero when none of its shifts start inside the window.
    pub minutes: HashMap<StaffKey, i64>,
    /// One warning per shift skipped for an unparsable timestamp.
    pub skipped: Vec<ReconciliationWarning>,
}

/// Aggregates scheduled minutes per staff key over a window.
///
/// A shift counts when its start lies in `[window.start, window.end)`; its
/// minutes are the rounded interval length less its break, never below
/// zero. The result does not depend on input order.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ReconciliationWindow, ScheduledShift, StaffIdentity, StaffKey};
/// use attendance_engine::reconciliation::aggregate_scheduled_minutes;
/// use chrono::{TimeZone, Utc};
///
/// let window = ReconciliationWindow::new(
///     Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 19, 0, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let shifts = vec![ScheduledShift {
///     id: None,
///     identity: StaffIdentity::new(Some("acct-1"), None),
///     starts_at: Some("2026-01-13T09:00:00Z".to_string()),
///     ends_at: Some("2026-01-13T17:30:00Z".to_string()),
///     break_minutes: Some(30),
/// }];
///
/// let aggregation = aggregate_scheduled_minutes(&shifts, &window);
/// let key = StaffKey::Account { account_id: "acct-1".to_string() };
/// assert_eq!(aggregation.minutes[&key], 480);
/// ```
pub fn aggregate_scheduled_minutes(
    shifts: &[ScheduledShift],
    window: &ReconciliationWindow,
) -> ShiftAggregation {
    let mut aggregation = ShiftAggregation::default();

    for (index, shift) in shifts.iter().enumerate() {
        let Some((start, _)) = shift.interval() else {
            let reference = shift_reference(shift, index);
            debug!(shift = %reference, "Skipping shift with malformed timestamp");
            aggregation.skipped.push(ReconciliationWarning::low(
                ReconciliationWarning::MALFORMED_SHIFT,
                format!(
                    "Shift {} skipped: unparsable timestamp (starts_at {}, ends_at {})",
                    reference,
                    quoted(shift.starts_at.as_deref()),
                    quoted(shift.ends_at.as_deref())
                ),
            ));
            continue;
        };

        let key = resolve_staff_key(&shift.identity);
        let total = aggregation.minutes.entry(key).or_insert(0);
        if window.contains(start) {
            *total += shift.scheduled_minutes().unwrap_or(0);
        }
    }

    aggregation
}

fn shift_reference(shift: &ScheduledShift, index: usize) -> String {
    match shift.id.as_deref() {
        Some(id) => format!("'{}'", id),
        None => format!("#{}", index),
    }
}
