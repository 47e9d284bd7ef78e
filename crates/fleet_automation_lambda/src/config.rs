use fleet_automation_core::command_document::{
    DEFAULT_DISPATCH_ENVIRONMENT, DEFAULT_DOCUMENT_ENVIRONMENT, DEFAULT_DOCUMENT_NAME,
};
use fleet_automation_core::fleet_health::{GroupFilter, TagMatch};

use crate::error::ConfigError;

pub const DEFAULT_LAST_EXECUTION_PARAMETER: &str = "/aws-automation/last-execution";
pub const LAST_EXECUTION_DESCRIPTION: &str = "Last execution timestamp of automation lambda";

pub const LAST_EXECUTION_PARAMETER_VAR: &str = "LAST_EXECUTION_PARAMETER";
pub const COMMAND_DOCUMENT_NAME_VAR: &str = "COMMAND_DOCUMENT_NAME";
pub const DOCUMENT_DEFAULT_ENVIRONMENT_VAR: &str = "DOCUMENT_DEFAULT_ENVIRONMENT";
pub const DISPATCH_ENVIRONMENT_VAR: &str = "DISPATCH_ENVIRONMENT";
pub const GROUP_NAME_PREFIX_VAR: &str = "GROUP_NAME_PREFIX";
pub const GROUP_TAG_FILTER_VAR: &str = "GROUP_TAG_FILTER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationConfig {
    pub last_execution_parameter: String,
    pub document_name: String,
    pub document_default_environment: String,
    pub dispatch_environment: String,
    pub group_filter: GroupFilter,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            last_execution_parameter: DEFAULT_LAST_EXECUTION_PARAMETER.to_string(),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            document_default_environment: DEFAULT_DOCUMENT_ENVIRONMENT.to_string(),
            dispatch_environment: DEFAULT_DISPATCH_ENVIRONMENT.to_string(),
            group_filter: GroupFilter::all(),
        }
    }
}

impl AutomationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup. Unset or blank variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let tag = read(GROUP_TAG_FILTER_VAR)
            .map(|raw| TagMatch::parse(&raw))
            .transpose()
            .map_err(|source| ConfigError::InvalidGroupFilter {
                variable: GROUP_TAG_FILTER_VAR,
                source,
            })?;

        Ok(Self {
            last_execution_parameter: read(LAST_EXECUTION_PARAMETER_VAR)
                .unwrap_or(defaults.last_execution_parameter),
            document_name: read(COMMAND_DOCUMENT_NAME_VAR).unwrap_or(defaults.document_name),
            document_default_environment: read(DOCUMENT_DEFAULT_ENVIRONMENT_VAR)
                .unwrap_or(defaults.document_default_environment),
            dispatch_environment: read(DISPATCH_ENVIRONMENT_VAR)
                .unwrap_or(defaults.dispatch_environment),
            group_filter: GroupFilter {
                name_prefix: read(GROUP_NAME_PREFIX_VAR),
                tag,
            },
        })
    }
}
