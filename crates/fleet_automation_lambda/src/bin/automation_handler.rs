use aws_config::BehaviorVersion;
use chrono::Utc;
use fleet_automation_lambda::adapters::aws::{
    AutoScalingFleetInventory, SsmCommandDispatcher, SsmDocumentRegistry, SsmParameterStore,
};
use fleet_automation_lambda::config::AutomationConfig;
use fleet_automation_lambda::context::AutomationContext;
use fleet_automation_lambda::handlers::invocation::{process_event, LambdaResponse};
use fleet_automation_lambda::logging::{init_logging, LogFormat};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

/// Clients built once per cold start and reused by warm invocations.
struct RuntimeDependencies {
    config: AutomationConfig,
    parameters: SsmParameterStore,
    fleet: AutoScalingFleetInventory,
    documents: SsmDocumentRegistry,
    commands: SsmCommandDispatcher,
}

impl RuntimeDependencies {
    fn context(&self) -> AutomationContext<'_> {
        AutomationContext {
            config: &self.config,
            parameters: &self.parameters,
            fleet: &self.fleet,
            documents: &self.documents,
            commands: &self.commands,
        }
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<LambdaResponse, Error> {
    process_event(event.payload, Utc::now(), &deps.context()).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(LogFormat::from_env());

    let config = AutomationConfig::from_env()?;
    info!(
        event = "config_loaded",
        document = %config.document_name,
        parameter = %config.last_execution_parameter,
        group_filtered = !config.group_filter.is_unfiltered(),
    );
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let ssm_client = aws_sdk_ssm::Client::new(&aws_config);
    let deps = RuntimeDependencies {
        config,
        parameters: SsmParameterStore::new(ssm_client.clone()),
        fleet: AutoScalingFleetInventory::new(aws_sdk_autoscaling::Client::new(&aws_config)),
        documents: SsmDocumentRegistry::new(ssm_client.clone()),
        commands: SsmCommandDispatcher::new(ssm_client),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
