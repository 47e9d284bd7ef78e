//! Side-effect primitives. Each one is callable on its own and comes in two
//! forms: a `try_*` function returning the collaborator error, and a
//! degrading wrapper that logs the failure and folds it into a result value.

pub mod command_dispatch;
pub mod document_upsert;
pub mod fleet_snapshot;
pub mod last_execution;
