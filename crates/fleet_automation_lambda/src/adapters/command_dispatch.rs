use std::collections::BTreeMap;

use crate::error::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCommandRequest {
    pub instance_ids: Vec<String>,
    pub document_name: String,
    pub parameters: BTreeMap<String, Vec<String>>,
    pub comment: String,
}

pub trait CommandDispatcher {
    /// Returns the command id assigned by the dispatch service.
    fn send_command(&self, request: &SendCommandRequest) -> Result<String, AdapterError>;
}
