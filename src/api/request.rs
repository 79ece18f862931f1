//! Request types for the Time & Attendance Variance Engine API.
//!
//! This module defines the JSON request structures for the `/variance` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PunchEvent, ReconciliationWindow, ScheduledShift, StaffDirectory, StaffProfile};

/// Request body for the `/variance` endpoint.
///
/// Shifts and punches arrive as the backend stores them; rows with
/// unparsable timestamps are skipped by the engine rather than rejected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceRequest {
    /// The reporting window.
    pub window: WindowRequest,
    /// Scheduled shifts for the restaurant.
    #[serde(default)]
    pub shifts: Vec<ScheduledShift>,
    /// Time clock punches for the restaurant.
    #[serde(default)]
    pub punches: Vec<PunchEvent>,
    /// Staff profiles used to resolve display names.
    #[serde(default)]
    pub staff: Vec<StaffProfile>,
}

impl VarianceRequest {
    /// Builds the staff directory from the request's profiles.
    pub fn directory(&self) -> StaffDirectory {
        StaffDirectory::new(self.staff.iter().cloned())
    }
}

/// Window bounds in a variance request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowRequest {
    /// The first instant inside the window.
    pub start: DateTime<Utc>,
    /// The first instant after the window.
    pub end: DateTime<Utc>,
}

impl TryFrom<WindowRequest> for ReconciliationWindow {
    type Error = EngineError;

    fn try_from(req: WindowRequest) -> Result<Self, Self::Error> {
        ReconciliationWindow::new(req.start, req.end)
    }
}
