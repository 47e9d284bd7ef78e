//! Shared fleet automation domain primitives.
//!
//! This crate owns the event/result contracts, event classification, the
//! configuration command document and fleet health summarization. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod command_document;
pub mod contract;
pub mod fleet_health;
