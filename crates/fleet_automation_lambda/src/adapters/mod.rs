pub mod aws;
pub mod command_dispatch;
pub mod document_registry;
pub mod fleet_inventory;
pub mod parameter_store;
