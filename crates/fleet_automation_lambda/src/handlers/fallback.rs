use fleet_automation_core::contract::DefaultResult;
use tracing::info;

use crate::actions::fleet_snapshot::snapshot_groups;
use crate::context::AutomationContext;

/// Events with no dedicated handler get a fleet health check only.
pub fn handle_default(context: &AutomationContext<'_>) -> DefaultResult {
    info!(event = "default_processing_started");
    DefaultResult {
        group_statuses: snapshot_groups(context.fleet, &context.config.group_filter),
    }
}
