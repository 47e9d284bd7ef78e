use chrono::{DateTime, Utc};
use fleet_automation_core::contract::{
    classify, EventError, HandlerKind, HandlerResult, InboundEvent, ResponseEnvelope,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::context::AutomationContext;
use crate::error::ProcessingError;
use crate::handlers::fallback::handle_default;
use crate::handlers::scheduled::handle_scheduled;
use crate::handlers::state_change::handle_state_change;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn route_event(
    context: &AutomationContext<'_>,
    event: &InboundEvent,
    timestamp: &str,
) -> Result<HandlerResult, EventError> {
    let kind = classify(event);
    info!(
        event = "event_classified",
        source = %event.source,
        detail_type = %event.detail_type,
        handler = kind.as_str(),
    );

    Ok(match kind {
        HandlerKind::Scheduled => {
            HandlerResult::ScheduledMaintenance(handle_scheduled(context, timestamp))
        }
        HandlerKind::StateChange => {
            HandlerResult::StateChange(handle_state_change(context, event)?)
        }
        HandlerKind::Default => HandlerResult::Default(handle_default(context)),
    })
}

/// Processes one event to completion. Collaborator failures are already folded
/// into the result; only a malformed event escapes as an error.
pub fn handle_event(
    event: Value,
    invoked_at: DateTime<Utc>,
    context: &AutomationContext<'_>,
) -> Result<ResponseEnvelope, ProcessingError> {
    info!(event = "event_received", payload = %event);

    let timestamp = invoked_at.to_rfc3339();
    let inbound = InboundEvent::from_value(event)?;
    let result = route_event(context, &inbound, &timestamp)?;
    info!(event = "event_handled", handler = result.kind().as_str());
    Ok(ResponseEnvelope::success(result, timestamp))
}

pub fn to_lambda_response(envelope: &ResponseEnvelope) -> Result<LambdaResponse, ProcessingError> {
    Ok(LambdaResponse {
        status_code: envelope.status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&envelope.body())?,
    })
}

/// Entry point used by the Lambda binary. Failures are logged here before they
/// propagate so the platform records the invocation as failed.
pub fn process_event(
    event: Value,
    invoked_at: DateTime<Utc>,
    context: &AutomationContext<'_>,
) -> Result<LambdaResponse, ProcessingError> {
    handle_event(event, invoked_at, context)
        .and_then(|envelope| to_lambda_response(&envelope))
        .map_err(|failure| {
            error!(event = "event_processing_failed", error = %failure);
            failure
        })
}
