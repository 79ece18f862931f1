//! HTTP API module for the Time & Attendance Variance Engine.
//!
//! This module exposes the variance report over a single REST endpoint. The
//! caller is expected to have authorized the request and scoped the shifts
//! and punches to one restaurant before posting them.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{VarianceRequest, WindowRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
