use crate::error::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterRequest {
    pub name: String,
    pub value: String,
    pub description: String,
    pub overwrite: bool,
}

/// Key/value store holding plain `String` parameters.
pub trait ParameterStore {
    fn put_parameter(&self, request: &PutParameterRequest) -> Result<(), AdapterError>;
}
