//! Reconciliation logic for the Time & Attendance Variance Engine.
//!
//! This module resolves staff identity keys, aggregates scheduled minutes,
//! reconstructs worked minutes from punches through a per-staff state
//! machine, and joins the two into sorted variance rows.

mod engine;
mod punch_reconstructor;
mod shift_aggregator;
mod staff_key;
mod time;
mod variance_reporter;

pub use engine::{VarianceEngine, reconcile};
pub use punch_reconstructor::{
    PunchMachine, PunchReconstruction, PunchState, TimedPunch, reconstruct_actual_minutes,
    reconstruct_worked_minutes,
};
pub use shift_aggregator::{ShiftAggregation, aggregate_scheduled_minutes};
pub use staff_key::{StaffLabels, resolve_staff_key};
pub use time::{parse_timestamp, rounded_minutes, whole_minutes_between};
pub use variance_reporter::build_variance_rows;
