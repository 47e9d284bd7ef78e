use crate::adapters::command_dispatch::CommandDispatcher;
use crate::adapters::document_registry::DocumentRegistry;
use crate::adapters::fleet_inventory::FleetInventory;
use crate::adapters::parameter_store::ParameterStore;
use crate::config::AutomationConfig;

/// Collaborators and settings for one invocation. Built from long-lived
/// clients, borrowed for the duration of a single event.
#[derive(Clone, Copy)]
pub struct AutomationContext<'a> {
    pub config: &'a AutomationConfig,
    pub parameters: &'a dyn ParameterStore,
    pub fleet: &'a dyn FleetInventory,
    pub documents: &'a dyn DocumentRegistry,
    pub commands: &'a dyn CommandDispatcher,
}
