use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCHEDULED_EVENT_DETAIL_TYPE: &str = "Scheduled Event";
pub const STATE_CHANGE_DETAIL_TYPE: &str = "EC2 State Change";
pub const UNKNOWN_FIELD_VALUE: &str = "unknown";
pub const INSTANCE_ID_DETAIL_KEY: &str = "instance-id";
pub const STATE_DETAIL_KEY: &str = "state";
pub const SUCCESS_STATUS_CODE: u16 = 200;
pub const SUCCESS_MESSAGE: &str = "Event processed successfully";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("event payload must be a JSON object")]
    NotAnObject,
    #[error("event field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// An EventBridge envelope as delivered to the handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboundEvent {
    pub source: String,
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    pub detail: Map<String, Value>,
}

impl InboundEvent {
    pub fn new(
        source: impl Into<String>,
        detail_type: impl Into<String>,
        detail: Map<String, Value>,
    ) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail,
        }
    }

    /// Reads the envelope leniently: absent `source`/`detail-type` become
    /// `"unknown"` and an absent or null `detail` becomes empty. Only a
    /// non-object payload or a non-object `detail` is rejected.
    pub fn from_value(event: Value) -> Result<Self, EventError> {
        let Value::Object(mut object) = event else {
            return Err(EventError::NotAnObject);
        };

        let source = label_or_unknown(object.remove("source"));
        let detail_type = label_or_unknown(object.remove("detail-type"));
        let detail = match object.remove("detail") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(detail)) => detail,
            Some(_) => {
                return Err(EventError::InvalidField {
                    field: "detail",
                    expected: "an object",
                })
            }
        };

        Ok(Self {
            source,
            detail_type,
            detail,
        })
    }

    /// Returns a string-valued detail entry; null and absent both read as `None`.
    pub fn detail_str(&self, key: &'static str) -> Result<Option<&str>, EventError> {
        match self.detail.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(EventError::InvalidField {
                field: key,
                expected: "a string",
            }),
        }
    }
}

fn label_or_unknown(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_FIELD_VALUE.to_string(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    Scheduled,
    StateChange,
    Default,
}

impl HandlerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::StateChange => "state_change",
            Self::Default => "default",
        }
    }
}

pub fn classify(event: &InboundEvent) -> HandlerKind {
    match event.detail_type.as_str() {
        SCHEDULED_EVENT_DETAIL_TYPE => HandlerKind::Scheduled,
        STATE_CHANGE_DETAIL_TYPE => HandlerKind::StateChange,
        _ => HandlerKind::Default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceTransition {
    Running,
    Terminated,
    Other,
}

impl InstanceTransition {
    pub fn from_state(state: &str) -> Self {
        match state {
            "running" => Self::Running,
            "terminated" => Self::Terminated,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupStatus {
    pub name: String,
    pub desired_capacity: i32,
    pub min_size: i32,
    pub max_size: i32,
    #[serde(rename = "instances")]
    pub total_instances: usize,
    pub healthy_instances: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Created,
    Updated,
    #[serde(rename = "error")]
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentOutcome {
    #[serde(rename = "action")]
    pub status: DocumentStatus,
    #[serde(rename = "document")]
    pub document_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocumentOutcome {
    pub fn created(document_name: impl Into<String>) -> Self {
        Self {
            status: DocumentStatus::Created,
            document_name: document_name.into(),
            message: None,
        }
    }

    pub fn updated(document_name: impl Into<String>) -> Self {
        Self {
            status: DocumentStatus::Updated,
            document_name: document_name.into(),
            message: None,
        }
    }

    pub fn unchanged(document_name: impl Into<String>) -> Self {
        Self {
            message: Some("document content unchanged".to_string()),
            ..Self::updated(document_name)
        }
    }

    pub fn failed(document_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: DocumentStatus::Failed,
            document_name: document_name.into(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledMaintenanceResult {
    #[serde(rename = "ssm_parameter_updated")]
    pub parameter_updated: bool,
    #[serde(rename = "asg_status")]
    pub group_statuses: Vec<GroupStatus>,
    #[serde(rename = "document_result")]
    pub document_outcome: DocumentOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateChangeResult {
    #[serde(rename = "instance_id")]
    pub resource_id: Option<String>,
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultResult {
    #[serde(rename = "asg_status")]
    pub group_statuses: Vec<GroupStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action")]
pub enum HandlerResult {
    #[serde(rename = "scheduled_maintenance")]
    ScheduledMaintenance(ScheduledMaintenanceResult),
    #[serde(rename = "ec2_state_change")]
    StateChange(StateChangeResult),
    #[serde(rename = "default_processing")]
    Default(DefaultResult),
}

impl HandlerResult {
    pub fn kind(&self) -> HandlerKind {
        match self {
            Self::ScheduledMaintenance(_) => HandlerKind::Scheduled,
            Self::StateChange(_) => HandlerKind::StateChange,
            Self::Default(_) => HandlerKind::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub message: String,
    pub result: HandlerResult,
    pub timestamp_utc: String,
}

/// JSON document carried in the response `body` string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseBody {
    pub message: String,
    pub result: HandlerResult,
    pub timestamp: String,
}

impl ResponseEnvelope {
    pub fn success(result: HandlerResult, timestamp_utc: impl Into<String>) -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            result,
            timestamp_utc: timestamp_utc.into(),
        }
    }

    pub fn body(&self) -> ResponseBody {
        ResponseBody {
            message: self.message.clone(),
            result: self.result.clone(),
            timestamp: self.timestamp_utc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event_with_detail_type(detail_type: &str) -> InboundEvent {
        InboundEvent::new("aws.events", detail_type, Map::new())
    }

    #[test]
    fn classify_routes_known_detail_types() {
        assert_eq!(
            classify(&event_with_detail_type("Scheduled Event")),
            HandlerKind::Scheduled
        );
        assert_eq!(
            classify(&event_with_detail_type("EC2 State Change")),
            HandlerKind::StateChange
        );
    }

    #[test]
    fn classify_falls_through_to_default() {
        for detail_type in [
            "",
            "unknown",
            "scheduled event",
            "EC2 Instance State-change Notification",
            "Scheduled Event ",
        ] {
            assert_eq!(
                classify(&event_with_detail_type(detail_type)),
                HandlerKind::Default,
                "detail type {detail_type:?} should classify as default"
            );
        }
    }

    #[test]
    fn from_value_defaults_missing_fields() {
        let event = InboundEvent::from_value(json!({})).expect("empty object should parse");

        assert_eq!(event.source, "unknown");
        assert_eq!(event.detail_type, "unknown");
        assert!(event.detail.is_empty());
        assert_eq!(classify(&event), HandlerKind::Default);
    }

    #[test]
    fn from_value_keeps_non_string_detail_type_classifiable() {
        let event = InboundEvent::from_value(json!({"detail-type": 42, "detail": null}))
            .expect("numeric detail-type should not fail parsing");

        assert_eq!(event.detail_type, "42");
        assert_eq!(classify(&event), HandlerKind::Default);
    }

    #[test]
    fn from_value_rejects_non_object_payloads() {
        assert_eq!(
            InboundEvent::from_value(json!(["not", "an", "event"])),
            Err(EventError::NotAnObject)
        );
        assert_eq!(
            InboundEvent::from_value(json!({"detail": "oops"})),
            Err(EventError::InvalidField {
                field: "detail",
                expected: "an object",
            })
        );
    }

    #[test]
    fn detail_str_treats_null_as_absent_and_rejects_other_types() {
        let event = InboundEvent::from_value(json!({
            "detail-type": "EC2 State Change",
            "detail": {"instance-id": null, "state": 7}
        }))
        .expect("event should parse");

        assert_eq!(event.detail_str(INSTANCE_ID_DETAIL_KEY), Ok(None));
        assert!(event.detail_str(STATE_DETAIL_KEY).is_err());
    }

    #[test]
    fn handler_result_serializes_with_action_tag() {
        let result = HandlerResult::ScheduledMaintenance(ScheduledMaintenanceResult {
            parameter_updated: true,
            group_statuses: vec![GroupStatus {
                name: "web".to_string(),
                desired_capacity: 2,
                min_size: 1,
                max_size: 4,
                total_instances: 2,
                healthy_instances: 1,
            }],
            document_outcome: DocumentOutcome::failed("Doc", "boom"),
        });

        let value = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(value["action"], "scheduled_maintenance");
        assert_eq!(value["ssm_parameter_updated"], true);
        assert_eq!(value["asg_status"][0]["instances"], 2);
        assert_eq!(value["asg_status"][0]["healthy_instances"], 1);
        assert_eq!(value["document_result"]["action"], "error");
        assert_eq!(value["document_result"]["message"], "boom");
    }

    #[test]
    fn state_change_result_omits_missing_command_id() {
        let result = HandlerResult::StateChange(StateChangeResult {
            resource_id: None,
            state: None,
            command_id: None,
        });

        let value = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(
            value,
            json!({"action": "ec2_state_change", "instance_id": null, "state": null})
        );
    }
}
