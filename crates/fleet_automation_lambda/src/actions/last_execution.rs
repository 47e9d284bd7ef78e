use tracing::{error, info};

use crate::adapters::parameter_store::{ParameterStore, PutParameterRequest};
use crate::config::{AutomationConfig, LAST_EXECUTION_DESCRIPTION};
use crate::error::AdapterError;

pub fn try_publish_last_execution(
    store: &dyn ParameterStore,
    config: &AutomationConfig,
    timestamp: &str,
) -> Result<(), AdapterError> {
    store.put_parameter(&PutParameterRequest {
        name: config.last_execution_parameter.clone(),
        value: timestamp.to_string(),
        description: LAST_EXECUTION_DESCRIPTION.to_string(),
        overwrite: true,
    })
}

/// Writes `timestamp` under the last-execution parameter, reporting success.
pub fn publish_last_execution(
    store: &dyn ParameterStore,
    config: &AutomationConfig,
    timestamp: &str,
) -> bool {
    match try_publish_last_execution(store, config, timestamp) {
        Ok(()) => {
            info!(
                event = "last_execution_published",
                parameter = %config.last_execution_parameter,
                value = timestamp,
            );
            true
        }
        Err(cause) => {
            error!(
                event = "last_execution_publish_failed",
                parameter = %config.last_execution_parameter,
                error = %cause,
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::RecordingParameterStore;

    use super::*;

    #[test]
    fn writes_overwriting_string_parameter() {
        let store = RecordingParameterStore::new();
        let config = AutomationConfig::default();

        assert!(publish_last_execution(&store, &config, "2026-10-16T08:00:00+00:00"));

        let requests = store.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "/aws-automation/last-execution");
        assert_eq!(requests[0].value, "2026-10-16T08:00:00+00:00");
        assert_eq!(
            requests[0].description,
            "Last execution timestamp of automation lambda"
        );
        assert!(requests[0].overwrite);
    }

    #[test]
    fn store_failure_reports_false() {
        let store = RecordingParameterStore::failing("AccessDeniedException");
        let config = AutomationConfig::default();

        assert!(!publish_last_execution(&store, &config, "2026-10-16T08:00:00+00:00"));
        assert!(try_publish_last_execution(&store, &config, "ts").is_err());
    }
}
