use fleet_automation_core::contract::{
    EventError, InboundEvent, InstanceTransition, StateChangeResult, INSTANCE_ID_DETAIL_KEY,
    STATE_DETAIL_KEY,
};
use tracing::info;

use crate::actions::command_dispatch::dispatch_command;
use crate::context::AutomationContext;

/// Echoes the observed instance id and state. A `running` instance is sent the
/// configuration command; `terminated` is only recorded. Empty strings count
/// as absent and never act.
pub fn handle_state_change(
    context: &AutomationContext<'_>,
    event: &InboundEvent,
) -> Result<StateChangeResult, EventError> {
    let resource_id = event.detail_str(INSTANCE_ID_DETAIL_KEY)?;
    let state = event.detail_str(STATE_DETAIL_KEY)?;

    let command_id = match (resource_id, state) {
        (Some(instance_id), Some(state)) if !instance_id.is_empty() && !state.is_empty() => {
            info!(event = "instance_state_changed", instance_id, state);
            match InstanceTransition::from_state(state) {
                InstanceTransition::Running => {
                    dispatch_command(context.commands, context.config, instance_id)
                }
                // Recorded only; replacement is left to the scaling group.
                InstanceTransition::Terminated => {
                    info!(event = "instance_terminated", instance_id);
                    None
                }
                InstanceTransition::Other => None,
            }
        }
        _ => {
            info!(
                event = "state_change_incomplete",
                instance_id = resource_id,
                state,
            );
            None
        }
    };

    Ok(StateChangeResult {
        resource_id: resource_id.map(str::to_string),
        state: state.map(str::to_string),
        command_id,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_helpers::{FakeCollaborators, RecordingCommandDispatcher};

    use super::*;

    fn state_change_event(detail: serde_json::Value) -> InboundEvent {
        InboundEvent::from_value(json!({
            "source": "aws.ec2",
            "detail-type": "EC2 State Change",
            "detail": detail,
        }))
        .expect("event should parse")
    }

    #[test]
    fn running_instance_is_configured() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"instance-id": "i-123", "state": "running"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.resource_id.as_deref(), Some("i-123"));
        assert_eq!(result.state.as_deref(), Some("running"));
        assert_eq!(result.command_id.as_deref(), Some("cmd-0001"));
        assert_eq!(fakes.commands.requests().len(), 1);
    }

    #[test]
    fn terminated_instance_is_recorded_only() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"instance-id": "i-123", "state": "terminated"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.state.as_deref(), Some("terminated"));
        assert_eq!(result.command_id, None);
        assert!(fakes.commands.requests().is_empty());
    }

    #[test]
    fn running_without_instance_id_does_not_dispatch() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"state": "running"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.resource_id, None);
        assert_eq!(result.state.as_deref(), Some("running"));
        assert!(fakes.commands.requests().is_empty());
    }

    #[test]
    fn empty_instance_id_does_not_dispatch() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"instance-id": "", "state": "running"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.resource_id.as_deref(), Some(""));
        assert_eq!(result.command_id, None);
        assert!(fakes.commands.requests().is_empty());
    }

    #[test]
    fn empty_state_does_not_dispatch() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"instance-id": "i-123", "state": ""}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.command_id, None);
        assert!(fakes.commands.requests().is_empty());
    }

    #[test]
    fn dispatch_without_command_id_leaves_command_id_empty() {
        let fakes = FakeCollaborators {
            commands: RecordingCommandDispatcher::default(),
            ..FakeCollaborators::default()
        };
        let event = state_change_event(json!({"instance-id": "i-123", "state": "running"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.command_id, None);
        assert_eq!(fakes.commands.requests().len(), 1);
    }

    #[test]
    fn failed_dispatch_leaves_command_id_empty() {
        let fakes = FakeCollaborators {
            commands: RecordingCommandDispatcher::failing("InvalidInstanceId"),
            ..FakeCollaborators::default()
        };
        let event = state_change_event(json!({"instance-id": "i-123", "state": "running"}));

        let result = handle_state_change(&fakes.context(), &event).expect("handler should succeed");

        assert_eq!(result.command_id, None);
        assert_eq!(result.resource_id.as_deref(), Some("i-123"));
    }

    #[test]
    fn non_string_instance_id_is_malformed() {
        let fakes = FakeCollaborators::default();
        let event = state_change_event(json!({"instance-id": 123, "state": "running"}));

        let error = handle_state_change(&fakes.context(), &event)
            .expect_err("numeric instance id should be rejected");

        assert_eq!(
            error,
            EventError::InvalidField {
                field: "instance-id",
                expected: "a string",
            }
        );
        assert!(fakes.commands.requests().is_empty());
    }
}
