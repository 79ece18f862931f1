//! Time & Attendance Variance Engine
//!
//! This crate reconciles staff clock punches against the shift schedule of a
//! restaurant: it reconstructs how many minutes each staff member actually
//! worked in a reporting window and compares that with what was scheduled.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
