//! AWS SDK implementations of the collaborator traits.
//!
//! The traits are synchronous; each call parks the current worker with
//! `block_in_place` and drives the SDK future to completion, so these adapters
//! require a multi-threaded tokio runtime.

use std::fmt::Display;
use std::future::Future;

use aws_sdk_autoscaling::types::AutoScalingGroup;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::send_command::SendCommandOutput;
use aws_sdk_ssm::operation::update_document::UpdateDocumentError;
use aws_sdk_ssm::types::{DocumentFormat, DocumentType, ParameterType};
use fleet_automation_core::fleet_health::{GroupRecord, InstanceRecord};

use crate::adapters::command_dispatch::{CommandDispatcher, SendCommandRequest};
use crate::adapters::document_registry::{
    CreateDocumentRequest, DocumentRegistry, UpdateDocumentRequest,
};
use crate::adapters::fleet_inventory::FleetInventory;
use crate::adapters::parameter_store::{ParameterStore, PutParameterRequest};
use crate::error::AdapterError;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

impl ParameterStore for SsmParameterStore {
    fn put_parameter(&self, request: &PutParameterRequest) -> Result<(), AdapterError> {
        block_on(async {
            self.client
                .put_parameter()
                .name(&request.name)
                .value(&request.value)
                .r#type(ParameterType::String)
                .overwrite(request.overwrite)
                .description(&request.description)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    AdapterError::service("put_parameter", DisplayErrorContext(&error))
                })
        })
    }
}

#[derive(Debug, Clone)]
pub struct SsmDocumentRegistry {
    client: aws_sdk_ssm::Client,
}

impl SsmDocumentRegistry {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

impl DocumentRegistry for SsmDocumentRegistry {
    fn update_document(&self, request: &UpdateDocumentRequest) -> Result<(), AdapterError> {
        block_on(async {
            self.client
                .update_document()
                .name(&request.name)
                .content(&request.content)
                .document_version(&request.document_version)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    update_failure(
                        &request.name,
                        error.as_service_error(),
                        DisplayErrorContext(&error),
                    )
                })
        })
    }

    fn create_document(&self, request: &CreateDocumentRequest) -> Result<(), AdapterError> {
        block_on(async {
            self.client
                .create_document()
                .name(&request.name)
                .content(&request.content)
                .document_type(DocumentType::from(request.document_type.as_str()))
                .document_format(DocumentFormat::from(request.document_format.as_str()))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    AdapterError::service("create_document", DisplayErrorContext(&error))
                })
        })
    }
}

#[derive(Debug, Clone)]
pub struct SsmCommandDispatcher {
    client: aws_sdk_ssm::Client,
}

impl SsmCommandDispatcher {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

impl CommandDispatcher for SsmCommandDispatcher {
    fn send_command(&self, request: &SendCommandRequest) -> Result<String, AdapterError> {
        let output = block_on(async {
            self.client
                .send_command()
                .set_instance_ids(Some(request.instance_ids.clone()))
                .document_name(&request.document_name)
                .set_parameters(Some(request.parameters.clone().into_iter().collect()))
                .comment(&request.comment)
                .send()
                .await
                .map_err(|error| {
                    AdapterError::service("send_command", DisplayErrorContext(&error))
                })
        })?;

        command_id(&output)
    }
}

// SSM answers an update of an unknown name with InvalidDocument.
fn update_failure(
    name: &str,
    service_error: Option<&UpdateDocumentError>,
    detail: impl Display,
) -> AdapterError {
    match service_error {
        Some(error) if error.is_invalid_document() => AdapterError::DocumentNotFound {
            name: name.to_string(),
        },
        Some(error) if error.is_duplicate_document_content() => {
            AdapterError::DocumentUnchanged {
                name: name.to_string(),
            }
        }
        _ => AdapterError::service("update_document", detail),
    }
}

fn command_id(output: &SendCommandOutput) -> Result<String, AdapterError> {
    output
        .command()
        .and_then(|command| command.command_id())
        .map(str::to_string)
        .ok_or(AdapterError::MissingField {
            operation: "send_command",
            field: "command_id",
        })
}

#[derive(Debug, Clone)]
pub struct AutoScalingFleetInventory {
    client: aws_sdk_autoscaling::Client,
}

impl AutoScalingFleetInventory {
    pub fn new(client: aws_sdk_autoscaling::Client) -> Self {
        Self { client }
    }
}

impl FleetInventory for AutoScalingFleetInventory {
    fn list_groups(&self) -> Result<Vec<GroupRecord>, AdapterError> {
        block_on(async {
            let mut groups = Vec::new();
            let mut next_token: Option<String> = None;
            loop {
                let page = self
                    .client
                    .describe_auto_scaling_groups()
                    .set_next_token(next_token.take())
                    .send()
                    .await
                    .map_err(|error| {
                        AdapterError::service(
                            "describe_auto_scaling_groups",
                            DisplayErrorContext(&error),
                        )
                    })?;

                groups.extend(page.auto_scaling_groups().iter().map(group_record));

                match page.next_token() {
                    Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                    _ => break,
                }
            }
            Ok::<_, AdapterError>(groups)
        })
    }
}

fn group_record(group: &AutoScalingGroup) -> GroupRecord {
    GroupRecord {
        name: group.auto_scaling_group_name().unwrap_or_default().to_string(),
        desired_capacity: group.desired_capacity().unwrap_or_default(),
        min_size: group.min_size().unwrap_or_default(),
        max_size: group.max_size().unwrap_or_default(),
        instances: group
            .instances()
            .iter()
            .map(|instance| InstanceRecord {
                health_status: instance.health_status().unwrap_or_default().to_string(),
            })
            .collect(),
        tags: group
            .tags()
            .iter()
            .filter_map(|tag| {
                let key = tag.key()?.to_string();
                Some((key, tag.value().unwrap_or_default().to_string()))
            })
            .collect(),
    }
}
