use fleet_automation_core::contract::GroupStatus;
use fleet_automation_core::fleet_health::{summarize_groups, GroupFilter};
use tracing::{error, info};

use crate::adapters::fleet_inventory::FleetInventory;
use crate::error::AdapterError;

pub fn try_snapshot_groups(
    inventory: &dyn FleetInventory,
    filter: &GroupFilter,
) -> Result<Vec<GroupStatus>, AdapterError> {
    let groups = inventory.list_groups()?;
    Ok(summarize_groups(&groups, filter))
}

/// Point-in-time health of every group the filter keeps. Fails closed: an
/// inventory error yields an empty snapshot.
pub fn snapshot_groups(inventory: &dyn FleetInventory, filter: &GroupFilter) -> Vec<GroupStatus> {
    match try_snapshot_groups(inventory, filter) {
        Ok(statuses) => {
            for status in &statuses {
                info!(
                    event = "group_health",
                    group = %status.name,
                    healthy = status.healthy_instances,
                    total = status.total_instances,
                    "{}: {}/{} healthy",
                    status.name,
                    status.healthy_instances,
                    status.total_instances,
                );
            }
            statuses
        }
        Err(cause) => {
            error!(event = "group_snapshot_failed", error = %cause);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use fleet_automation_core::fleet_health::TagMatch;

    use crate::test_helpers::{group_record, StaticFleetInventory};

    use super::*;

    #[test]
    fn summarizes_every_listed_group() {
        let inventory = StaticFleetInventory::with_groups(vec![
            group_record("web", &["Healthy", "Unhealthy"]),
            group_record("batch", &["Healthy"]),
        ]);

        let statuses = snapshot_groups(&inventory, &GroupFilter::all());

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].name, "web");
        assert_eq!(statuses[0].total_instances, 2);
        assert_eq!(statuses[0].healthy_instances, 1);
        assert_eq!(statuses[1].healthy_instances, 1);
    }

    #[test]
    fn inventory_failure_yields_empty_snapshot() {
        let inventory = StaticFleetInventory::failing("Throttling: Rate exceeded");

        assert!(snapshot_groups(&inventory, &GroupFilter::all()).is_empty());
        assert!(try_snapshot_groups(&inventory, &GroupFilter::all()).is_err());
    }

    #[test]
    fn filter_limits_snapshot() {
        let mut tagged = group_record("tagged", &["Healthy"]);
        tagged
            .tags
            .insert("managed-by".to_string(), "automation".to_string());
        let inventory =
            StaticFleetInventory::with_groups(vec![tagged, group_record("other", &["Healthy"])]);
        let filter = GroupFilter {
            name_prefix: None,
            tag: Some(TagMatch {
                key: "managed-by".to_string(),
                value: "automation".to_string(),
            }),
        };

        let statuses = snapshot_groups(&inventory, &filter);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].name, "tagged");
    }
}
