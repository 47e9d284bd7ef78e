use fleet_automation_core::command_document::{
    content_fingerprint, CommandDocument, LATEST_DOCUMENT_VERSION,
};
use fleet_automation_core::contract::DocumentOutcome;
use tracing::{error, info};

use crate::adapters::document_registry::{
    CreateDocumentRequest, DocumentRegistry, UpdateDocumentRequest, COMMAND_DOCUMENT_TYPE,
    JSON_DOCUMENT_FORMAT,
};
use crate::config::AutomationConfig;
use crate::error::AdapterError;

/// Update-then-create: an update of a missing document falls back to create,
/// and an update with identical content counts as already converged.
pub fn try_upsert_document(
    registry: &dyn DocumentRegistry,
    config: &AutomationConfig,
) -> Result<DocumentOutcome, AdapterError> {
    let name = config.document_name.as_str();
    let content = CommandDocument::configure_instance(&config.document_default_environment)
        .to_json()
        .map_err(|error| AdapterError::service("render_document", error))?;
    let fingerprint = content_fingerprint(&content);

    let update = UpdateDocumentRequest {
        name: name.to_string(),
        content: content.clone(),
        document_version: LATEST_DOCUMENT_VERSION.to_string(),
    };
    match registry.update_document(&update) {
        Ok(()) => {
            info!(event = "document_updated", document = name, fingerprint = %fingerprint);
            Ok(DocumentOutcome::updated(name))
        }
        Err(AdapterError::DocumentUnchanged { .. }) => {
            info!(event = "document_unchanged", document = name, fingerprint = %fingerprint);
            Ok(DocumentOutcome::unchanged(name))
        }
        Err(AdapterError::DocumentNotFound { .. }) => {
            registry.create_document(&CreateDocumentRequest {
                name: name.to_string(),
                content,
                document_type: COMMAND_DOCUMENT_TYPE.to_string(),
                document_format: JSON_DOCUMENT_FORMAT.to_string(),
            })?;
            info!(event = "document_created", document = name, fingerprint = %fingerprint);
            Ok(DocumentOutcome::created(name))
        }
        Err(other) => Err(other),
    }
}

pub fn upsert_document(
    registry: &dyn DocumentRegistry,
    config: &AutomationConfig,
) -> DocumentOutcome {
    try_upsert_document(registry, config).unwrap_or_else(|cause| {
        error!(
            event = "document_upsert_failed",
            document = %config.document_name,
            error = %cause,
        );
        DocumentOutcome::failed(config.document_name.as_str(), cause.to_string())
    })
}
