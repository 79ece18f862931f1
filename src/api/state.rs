//! Application state for the Time & Attendance Variance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::reconciliation::VarianceEngine;

/// Shared application state.
///
/// Contains the loaded configuration and the engine built from it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The engine serving reports.
    engine: Arc<VarianceEngine>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let engine = VarianceEngine::from_config(&config);
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the variance engine.
    pub fn engine(&self) -> &VarianceEngine {
        &self.engine
    }
}
