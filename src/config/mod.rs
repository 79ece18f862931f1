//! Configuration loading and management for the Time & Attendance Variance Engine.
//!
//! This module loads engine settings from a YAML configuration directory,
//! including engine metadata and the report presentation settings.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata, ReportSettings};
