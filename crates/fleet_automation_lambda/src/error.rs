use std::fmt::Display;

use fleet_automation_core::contract::EventError;
use fleet_automation_core::fleet_health::GroupFilterError;

/// Failure reported by an external collaborator. These are expected and are
/// folded into result fields by the action that observed them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("document '{name}' does not exist")]
    DocumentNotFound { name: String },
    #[error("document '{name}' already matches the submitted content")]
    DocumentUnchanged { name: String },
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl AdapterError {
    pub fn service(operation: &'static str, error: impl Display) -> Self {
        Self::Service {
            operation,
            message: error.to_string(),
        }
    }
}

/// Unexpected failure that aborts the invocation.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] EventError),
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} is invalid: {source}")]
    InvalidGroupFilter {
        variable: &'static str,
        #[source]
        source: GroupFilterError,
    },
}
