//! Error types for the Time & Attendance Variance Engine.
//!
//! The reconciliation pipeline itself never fails: malformed rows are skipped
//! and irregular punch sequences are absorbed. These errors cover the layers
//! around it, namely configuration loading and request validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for the Time & Attendance Variance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A reconciliation window whose end does not lie after its start.
    #[error("Invalid reconciliation window: end {end} is not after start {start}")]
    InvalidWindow {
        /// The window start.
        start: DateTime<Utc>,
        /// The window end.
        end: DateTime<Utc>,
    },

    /// A reconciliation window longer than the configured maximum.
    #[error("Reconciliation window spans {days} days, maximum is {max_days}")]
    WindowTooLong {
        /// Length of the requested window in whole days (rounded up).
        days: i64,
        /// The configured maximum.
        max_days: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
