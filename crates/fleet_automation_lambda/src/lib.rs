//! AWS-oriented adapters and handlers for fleet automation events.
//!
//! This crate owns runtime integration details (the Lambda entry point,
//! collaborator traits with their SSM and Auto Scaling adapters, and the
//! per-event handlers). Pure contracts live in `fleet_automation_core`.

pub mod actions;
pub mod adapters;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
