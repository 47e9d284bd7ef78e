use fleet_automation_core::contract::ScheduledMaintenanceResult;
use tracing::info;

use crate::actions::document_upsert::upsert_document;
use crate::actions::fleet_snapshot::snapshot_groups;
use crate::actions::last_execution::publish_last_execution;
use crate::context::AutomationContext;

/// Runs all three maintenance steps; a failing step degrades its own field and
/// never stops the steps after it.
pub fn handle_scheduled(
    context: &AutomationContext<'_>,
    timestamp: &str,
) -> ScheduledMaintenanceResult {
    info!(event = "scheduled_maintenance_started");

    let parameter_updated = publish_last_execution(context.parameters, context.config, timestamp);
    let group_statuses = snapshot_groups(context.fleet, &context.config.group_filter);
    let document_outcome = upsert_document(context.documents, context.config);

    ScheduledMaintenanceResult {
        parameter_updated,
        group_statuses,
        document_outcome,
    }
}
