pub mod fallback;
pub mod invocation;
pub mod scheduled;
pub mod state_change;
