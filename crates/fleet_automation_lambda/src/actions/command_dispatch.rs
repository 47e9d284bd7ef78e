use std::collections::BTreeMap;

use fleet_automation_core::command_document::ENVIRONMENT_PARAMETER;
use tracing::{error, info};

use crate::adapters::command_dispatch::{CommandDispatcher, SendCommandRequest};
use crate::config::AutomationConfig;
use crate::error::AdapterError;

pub fn configure_instance_request(
    instance_id: &str,
    config: &AutomationConfig,
) -> SendCommandRequest {
    SendCommandRequest {
        instance_ids: vec![instance_id.to_string()],
        document_name: config.document_name.clone(),
        parameters: BTreeMap::from([(
            ENVIRONMENT_PARAMETER.to_string(),
            vec![config.dispatch_environment.clone()],
        )]),
        comment: format!("Configuring instance {instance_id} via automation"),
    }
}

pub fn try_dispatch_command(
    dispatcher: &dyn CommandDispatcher,
    config: &AutomationConfig,
    instance_id: &str,
) -> Result<String, AdapterError> {
    dispatcher.send_command(&configure_instance_request(instance_id, config))
}

/// Sends the configuration document to one instance, returning the command id.
pub fn dispatch_command(
    dispatcher: &dyn CommandDispatcher,
    config: &AutomationConfig,
    instance_id: &str,
) -> Option<String> {
    match try_dispatch_command(dispatcher, config, instance_id) {
        Ok(command_id) => {
            info!(
                event = "command_dispatched",
                command_id = %command_id,
                instance_id,
                document = %config.document_name,
            );
            Some(command_id)
        }
        Err(cause) => {
            error!(
                event = "command_dispatch_failed",
                instance_id,
                document = %config.document_name,
                error = %cause,
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::RecordingCommandDispatcher;

    use super::*;

    #[test]
    fn targets_single_instance_with_production_environment() {
        let dispatcher = RecordingCommandDispatcher::returning("cmd-0001");

        let command_id = dispatch_command(&dispatcher, &AutomationConfig::default(), "i-123");

        assert_eq!(command_id.as_deref(), Some("cmd-0001"));
        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].instance_ids, vec!["i-123".to_string()]);
        assert_eq!(requests[0].document_name, "AWS-Automation-ConfigureInstance");
        assert_eq!(
            requests[0].parameters.get("environment"),
            Some(&vec!["production".to_string()])
        );
        assert_eq!(requests[0].comment, "Configuring instance i-123 via automation");
    }

    #[test]
    fn dispatch_failure_yields_none() {
        let dispatcher = RecordingCommandDispatcher::failing("InvalidInstanceId");

        assert_eq!(
            dispatch_command(&dispatcher, &AutomationConfig::default(), "i-404"),
            None
        );
        assert_eq!(dispatcher.requests().len(), 1);
    }
}
