//! In-memory collaborators for exercising handlers without AWS.

use std::collections::BTreeMap;
use std::sync::Mutex;

use fleet_automation_core::fleet_health::{GroupRecord, InstanceRecord};

use crate::adapters::command_dispatch::{CommandDispatcher, SendCommandRequest};
use crate::adapters::document_registry::{
    CreateDocumentRequest, DocumentRegistry, UpdateDocumentRequest,
};
use crate::adapters::fleet_inventory::FleetInventory;
use crate::adapters::parameter_store::{ParameterStore, PutParameterRequest};
use crate::config::AutomationConfig;
use crate::context::AutomationContext;
use crate::error::AdapterError;

pub fn group_record(name: &str, health_statuses: &[&str]) -> GroupRecord {
    GroupRecord {
        name: name.to_string(),
        desired_capacity: health_statuses.len() as i32,
        min_size: 1,
        max_size: 4,
        instances: health_statuses
            .iter()
            .map(|status| InstanceRecord {
                health_status: status.to_string(),
            })
            .collect(),
        tags: BTreeMap::new(),
    }
}

#[derive(Debug, Default)]
pub struct RecordingParameterStore {
    requests: Mutex<Vec<PutParameterRequest>>,
    failure: Option<String>,
}

impl RecordingParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<PutParameterRequest> {
        self.requests.lock().expect("poisoned mutex").clone()
    }
}

impl ParameterStore for RecordingParameterStore {
    fn put_parameter(&self, request: &PutParameterRequest) -> Result<(), AdapterError> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push(request.clone());
        match &self.failure {
            Some(message) => Err(AdapterError::service("put_parameter", message)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct StaticFleetInventory {
    groups: Vec<GroupRecord>,
    failure: Option<String>,
    calls: Mutex<usize>,
}

impl StaticFleetInventory {
    pub fn with_groups(groups: Vec<GroupRecord>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("poisoned mutex")
    }
}

impl FleetInventory for StaticFleetInventory {
    fn list_groups(&self) -> Result<Vec<GroupRecord>, AdapterError> {
        *self.calls.lock().expect("poisoned mutex") += 1;
        match &self.failure {
            Some(message) => Err(AdapterError::service(
                "describe_auto_scaling_groups",
                message,
            )),
            None => Ok(self.groups.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCall {
    Update(UpdateDocumentRequest),
    Create(CreateDocumentRequest),
}

/// Behaves like the SSM document API: updates of unknown names miss, updates
/// with identical content are rejected, and creates of existing names fail.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRegistry {
    documents: Mutex<BTreeMap<String, String>>,
    calls: Mutex<Vec<DocumentCall>>,
    failure: Option<String>,
}

impl InMemoryDocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn seed(&self, name: &str, content: &str) {
        self.documents
            .lock()
            .expect("poisoned mutex")
            .insert(name.to_string(), content.to_string());
    }

    pub fn content(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .expect("poisoned mutex")
            .get(name)
            .cloned()
    }

    pub fn calls(&self) -> Vec<DocumentCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }
}

impl DocumentRegistry for InMemoryDocumentRegistry {
    fn update_document(&self, request: &UpdateDocumentRequest) -> Result<(), AdapterError> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push(DocumentCall::Update(request.clone()));
        if let Some(message) = &self.failure {
            return Err(AdapterError::service("update_document", message));
        }

        let mut documents = self.documents.lock().expect("poisoned mutex");
        let existing = documents.get(&request.name).cloned();
        match existing {
            None => Err(AdapterError::DocumentNotFound {
                name: request.name.clone(),
            }),
            Some(existing) if existing == request.content => {
                Err(AdapterError::DocumentUnchanged {
                    name: request.name.clone(),
                })
            }
            Some(_) => {
                documents.insert(request.name.clone(), request.content.clone());
                Ok(())
            }
        }
    }

    fn create_document(&self, request: &CreateDocumentRequest) -> Result<(), AdapterError> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push(DocumentCall::Create(request.clone()));
        if let Some(message) = &self.failure {
            return Err(AdapterError::service("create_document", message));
        }

        let mut documents = self.documents.lock().expect("poisoned mutex");
        if documents.contains_key(&request.name) {
            return Err(AdapterError::service(
                "create_document",
                format!("DocumentAlreadyExists: {}", request.name),
            ));
        }
        documents.insert(request.name.clone(), request.content.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingCommandDispatcher {
    requests: Mutex<Vec<SendCommandRequest>>,
    command_id: Option<String>,
    failure: Option<String>,
}

impl RecordingCommandDispatcher {
    pub fn returning(command_id: &str) -> Self {
        Self {
            command_id: Some(command_id.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SendCommandRequest> {
        self.requests.lock().expect("poisoned mutex").clone()
    }
}

impl CommandDispatcher for RecordingCommandDispatcher {
    fn send_command(&self, request: &SendCommandRequest) -> Result<String, AdapterError> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push(request.clone());
        if let Some(message) = &self.failure {
            return Err(AdapterError::service("send_command", message));
        }
        self.command_id.clone().ok_or(AdapterError::MissingField {
            operation: "send_command",
            field: "command_id",
        })
    }
}

/// One of each fake, wired into an [`AutomationContext`] on demand.
#[derive(Debug)]
pub struct FakeCollaborators {
    pub config: AutomationConfig,
    pub parameters: RecordingParameterStore,
    pub fleet: StaticFleetInventory,
    pub documents: InMemoryDocumentRegistry,
    pub commands: RecordingCommandDispatcher,
}

impl Default for FakeCollaborators {
    fn default() -> Self {
        Self {
            config: AutomationConfig::default(),
            parameters: RecordingParameterStore::new(),
            fleet: StaticFleetInventory::default(),
            documents: InMemoryDocumentRegistry::new(),
            commands: RecordingCommandDispatcher::returning("cmd-0001"),
        }
    }
}

impl FakeCollaborators {
    pub fn context(&self) -> AutomationContext<'_> {
        AutomationContext {
            config: &self.config,
            parameters: &self.parameters,
            fleet: &self.fleet,
            documents: &self.documents,
            commands: &self.commands,
        }
    }
}
