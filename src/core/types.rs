use serde_json::Value;

use super::{error::GatewayError, schema::SchemaDescriptor};

/// A single prompt-completion request.
///
/// Fields are fixed at construction; the `with_*` methods consume the request
/// and return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    system_instruction: Option<String>,
    response_schema: Option<SchemaDescriptor>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Ask for JSON conforming to `schema` instead of free text.
    pub fn with_response_schema(mut self, schema: SchemaDescriptor) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn response_schema(&self) -> Option<&SchemaDescriptor> {
        self.response_schema.as_ref()
    }

    pub(crate) fn validate(&self) -> Result<(), GatewayError> {
        if self.model.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Missing model. Make sure to specify a model identifier.".to_string(),
            ));
        }
        if !is_model_identifier(&self.model) {
            return Err(GatewayError::InvalidRequest(format!(
                "Invalid model '{}'. Model identifiers may only contain ASCII letters, digits, \
                 '.', '_' and '-'.",
                self.model
            )));
        }
        if self.prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Missing prompt. Make sure the prompt is not empty.".to_string(),
            ));
        }
        if let Some(schema) = &self.response_schema {
            schema.validate_definition()?;
        }
        Ok(())
    }
}

/// The model is interpolated into the endpoint path, so anything that could
/// change the path (`/`, `?`, `#`, whitespace) is refused.
fn is_model_identifier(model: &str) -> bool {
    !model.is_empty()
        && !model.chars().all(|c| c == '.')
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Successful gateway output, tagged by whether a schema was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Structured(Value),
    Text(String),
}

impl GenerationResult {
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            GenerationResult::Structured(value) => Some(value),
            GenerationResult::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GenerationResult::Text(text) => Some(text),
            GenerationResult::Structured(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            GenerationResult::Structured(value) => value,
            GenerationResult::Text(text) => Value::String(text),
        }
    }

    /// Text results as-is; structured results re-serialized as compact JSON.
    pub fn into_text(self) -> String {
        match self {
            GenerationResult::Structured(value) => value.to_string(),
            GenerationResult::Text(text) => text,
        }
    }
}
