//! The instance configuration command document.
//!
//! The content is fixed apart from the default value of its single
//! `environment` parameter, so repeated upserts converge on the same document.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

pub const DEFAULT_DOCUMENT_NAME: &str = "AWS-Automation-ConfigureInstance";
pub const DEFAULT_DOCUMENT_ENVIRONMENT: &str = "dev";
pub const DEFAULT_DISPATCH_ENVIRONMENT: &str = "production";
pub const ENVIRONMENT_PARAMETER: &str = "environment";
pub const DOCUMENT_SCHEMA_VERSION: &str = "2.2";
pub const LATEST_DOCUMENT_VERSION: &str = "$LATEST";

const DOCUMENT_DESCRIPTION: &str = "Configure EC2 instance via Systems Manager";
const CONFIGURE_SCRIPT: [&str; 7] = [
    "#!/bin/bash",
    "echo 'Starting instance configuration'",
    "yum update -y",
    "yum install -y amazon-cloudwatch-agent",
    "systemctl enable amazon-cloudwatch-agent",
    "systemctl start amazon-cloudwatch-agent",
    "echo 'Instance configuration completed'",
];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandDocument {
    pub schema_version: String,
    pub description: String,
    pub parameters: BTreeMap<String, DocumentParameter>,
    pub main_steps: Vec<DocumentStep>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentParameter {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub default: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentStep {
    pub action: String,
    pub name: String,
    pub inputs: StepInputs,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepInputs {
    pub run_command: Vec<String>,
}

impl CommandDocument {
    pub fn configure_instance(default_environment: &str) -> Self {
        let parameters = BTreeMap::from([(
            ENVIRONMENT_PARAMETER.to_string(),
            DocumentParameter {
                kind: "String".to_string(),
                description: "Environment name".to_string(),
                default: default_environment.to_string(),
            },
        )]);

        Self {
            schema_version: DOCUMENT_SCHEMA_VERSION.to_string(),
            description: DOCUMENT_DESCRIPTION.to_string(),
            parameters,
            main_steps: vec![DocumentStep {
                action: "aws:runShellScript".to_string(),
                name: "configureInstance".to_string(),
                inputs: StepInputs {
                    run_command: CONFIGURE_SCRIPT.iter().map(|line| line.to_string()).collect(),
                },
            }],
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Hex SHA-256 of rendered document content, logged alongside upserts.
pub fn content_fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn renders_command_document_shape() {
        let content = CommandDocument::configure_instance(DEFAULT_DOCUMENT_ENVIRONMENT)
            .to_json()
            .expect("document should render");
        let value: Value = serde_json::from_str(&content).expect("content should be JSON");

        assert_eq!(value["schemaVersion"], "2.2");
        assert_eq!(value["parameters"]["environment"]["type"], "String");
        assert_eq!(value["parameters"]["environment"]["default"], "dev");
        assert_eq!(value["mainSteps"][0]["action"], "aws:runShellScript");
        assert_eq!(value["mainSteps"][0]["name"], "configureInstance");

        let commands = value["mainSteps"][0]["inputs"]["runCommand"]
            .as_array()
            .expect("runCommand should be a list");
        assert_eq!(commands.len(), 7);
        assert_eq!(commands[3], "yum install -y amazon-cloudwatch-agent");
    }

    #[test]
    fn fingerprint_tracks_default_environment() {
        let dev = CommandDocument::configure_instance("dev")
            .to_json()
            .expect("document should render");
        let dev_again = CommandDocument::configure_instance("dev")
            .to_json()
            .expect("document should render");
        let staging = CommandDocument::configure_instance("staging")
            .to_json()
            .expect("document should render");

        assert_eq!(content_fingerprint(&dev), content_fingerprint(&dev_again));
        assert_ne!(content_fingerprint(&dev), content_fingerprint(&staging));
        assert_eq!(content_fingerprint(&dev).len(), 64);
    }
}
