//! The reconciliation pipeline.
//!
//! Wires key resolution, shift aggregation, punch reconstruction and row
//! assembly into a single pure report computation.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::{ConfigLoader, ReportSettings};
use crate::models::{
    PunchEvent, ReconciliationWindow, ReportTotals, ScheduledShift, StaffDirectory,
    VarianceReport, VarianceRow,
};

use super::punch_reconstructor::reconstruct_actual_minutes;
use super::shift_aggregator::aggregate_scheduled_minutes;
use super::staff_key::StaffLabels;
use super::variance_reporter::build_variance_rows;

/// Compares scheduled against actual minutes per staff member.
///
/// The engine holds no mutable state; one instance can serve any number of
/// concurrent reports.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ReportSettings;
/// use attendance_engine::models::{
///     PunchAction, PunchEvent, ReconciliationWindow, ScheduledShift, StaffDirectory,
///     StaffIdentity,
/// };
/// use attendance_engine::reconciliation::VarianceEngine;
/// use chrono::{TimeZone, Utc};
///
/// let window = ReconciliationWindow::new(
///     Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 19, 0, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let ana = StaffIdentity::new(Some("ana"), None);
/// let shifts = vec![ScheduledShift {
///     id: None,
///     identity: ana.clone(),
///     starts_at: Some("2026-01-13T09:00:00Z".to_string()),
///     ends_at: Some("2026-01-13T17:00:00Z".to_string()),
///     break_minutes: None,
/// }];
/// let punches = vec![
///     PunchEvent {
///         identity: ana.clone(),
///         action: PunchAction::ClockIn,
///         at: Some("2026-01-13T09:00:00Z".to_string()),
///     },
///     PunchEvent {
///         identity: ana,
///         action: PunchAction::ClockOut,
///         at: Some("2026-01-13T16:30:00Z".to_string()),
///     },
/// ];
///
/// let engine = VarianceEngine::new(ReportSettings::default());
/// let report = engine.reconcile(&window, &shifts, &punches, &StaffDirectory::default());
///
/// assert_eq!(report.rows.len(), 1);
/// assert_eq!(report.rows[0].variance_minutes, -30);
/// ```
#[derive(Debug, Clone)]
pub struct VarianceEngine {
    engine_version: String,
    settings: ReportSettings,
}

impl VarianceEngine {
    /// Creates an engine stamped with the crate version.
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            settings,
        }
    }

    /// Creates an engine from loaded configuration, stamped with the
    /// configured engine version.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self {
            engine_version: config.engine().version.clone(),
            settings: config.report().clone(),
        }
    }

    /// Returns the report settings in use.
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Produces the variance report for a window.
    ///
    /// Never fails: malformed rows become warnings and irregular punch
    /// sequences are absorbed by the state machine.
    pub fn reconcile(
        &self,
        window: &ReconciliationWindow,
        shifts: &[ScheduledShift],
        punches: &[PunchEvent],
        directory: &StaffDirectory,
    ) -> VarianceReport {
        let started = Instant::now();

        let labels = StaffLabels::from_rows(shifts, punches);
        let scheduled = aggregate_scheduled_minutes(shifts, window);
        let actual = reconstruct_actual_minutes(punches, window);

        let rows = build_variance_rows(
            &scheduled.minutes,
            &actual.minutes,
            &labels,
            directory,
            self.settings.unknown_staff_label.as_deref(),
        );
        let totals = ReportTotals::from_rows(&rows);

        let mut warnings = scheduled.skipped;
        warnings.extend(actual.skipped);

        debug!(
            shifts = shifts.len(),
            punches = punches.len(),
            rows = rows.len(),
            skipped = warnings.len(),
            variance_minutes = totals.variance_minutes,
            "Reconciled attendance window"
        );

        VarianceReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: self.engine_version.clone(),
            window: *window,
            rows,
            totals,
            warnings,
            duration_us: started.elapsed().as_micros() as u64,
        }
    }
}

impl Default for VarianceEngine {
    fn default() -> Self {
        Self::new(ReportSettings::default())
    }
}

/// Reconciles a window and returns only the sorted rows.
///
/// Labels fall back to account id, then PIN, then the raw key.
pub fn reconcile(
    window: &ReconciliationWindow,
    shifts: &[ScheduledShift],
    punches: &[PunchEvent],
) -> Vec<VarianceRow> {
    VarianceEngine::default()
        .reconcile(window, shifts, punches, &StaffDirectory::default())
        .rows
}
