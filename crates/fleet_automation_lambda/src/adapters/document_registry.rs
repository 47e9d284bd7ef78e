use crate::error::AdapterError;

pub const COMMAND_DOCUMENT_TYPE: &str = "Command";
pub const JSON_DOCUMENT_FORMAT: &str = "JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDocumentRequest {
    pub name: String,
    pub content: String,
    pub document_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub name: String,
    pub content: String,
    pub document_type: String,
    pub document_format: String,
}

pub trait DocumentRegistry {
    /// Fails with [`AdapterError::DocumentNotFound`] when no document has the
    /// requested name and with [`AdapterError::DocumentUnchanged`] when the
    /// latest version already holds the same content.
    fn update_document(&self, request: &UpdateDocumentRequest) -> Result<(), AdapterError>;

    fn create_document(&self, request: &CreateDocumentRequest) -> Result<(), AdapterError>;
}
