//! Core data models for the Time & Attendance Variance Engine.
//!
//! This module contains the input rows (shifts, punches), the reporting
//! window, staff identity types, and the report produced by the engine.

mod lenient;
mod punch;
mod shift;
mod staff;
mod variance_report;
mod window;

pub use punch::{PunchAction, PunchEvent};
pub use shift::ScheduledShift;
pub use staff::{StaffDirectory, StaffIdentity, StaffKey, StaffProfile};
pub use variance_report::{
    ReconciliationWarning, ReportTotals, VarianceReport, VarianceRow, minutes_to_hours,
};
pub use window::ReconciliationWindow;
