use fleet_automation_core::fleet_health::GroupRecord;

use crate::error::AdapterError;

/// Read-only listing of scaling groups. Implementations return every page.
pub trait FleetInventory {
    fn list_groups(&self) -> Result<Vec<GroupRecord>, AdapterError>;
}
