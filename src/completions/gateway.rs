use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::core::{
    ApiKey, Credential, GatewayError, GenerationRequest, GenerationResult, ProviderCall,
    SchemaDescriptor, Transport,
};
use crate::provider::{GeminiConfig, GeminiTransport};

/// Schema-validated prompt-completion gateway.
///
/// Holds an immutable credential and a transport, so a single instance can be
/// shared across tasks. Each call makes at most one outbound request.
pub struct Gateway<T: Transport = GeminiTransport> {
    credential: Credential,
    transport: T,
}

impl Gateway<GeminiTransport> {
    /// Gateway for the hosted Gemini API with default settings.
    pub fn gemini(api_key: ApiKey) -> Result<Self, GatewayError> {
        Self::gemini_with_config(api_key, GeminiConfig::default())
    }

    pub fn gemini_with_config(api_key: ApiKey, config: GeminiConfig) -> Result<Self, GatewayError> {
        Ok(Self::new(api_key.resolve(), GeminiTransport::new(config)?))
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(credential: Credential, transport: T) -> Self {
        Self {
            credential,
            transport,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_configured()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one completion.
    ///
    /// With a response schema the provider text is parsed as JSON and checked
    /// against the schema, yielding [`GenerationResult::Structured`]. Without
    /// one the raw text is returned as [`GenerationResult::Text`], empty when
    /// the provider sent none.
    #[tracing::instrument(
        name = "gateway_complete",
        skip(self, request),
        fields(
            model = %request.model(),
            structured = request.response_schema().is_some()
        ),
        err
    )]
    pub async fn complete(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let credential = self.credential.require()?;
        request.validate()?;

        let text = self
            .transport
            .generate(credential, ProviderCall::from(request))
            .await?;

        match request.response_schema() {
            Some(schema) => {
                let value = parse_structured(text.as_deref(), schema)?;
                debug!("Structured response validated");
                Ok(GenerationResult::Structured(value))
            }
            None => Ok(GenerationResult::Text(text.unwrap_or_default())),
        }
    }

    /// Structured completion deserialized into `R`.
    ///
    /// The request must carry a response schema describing `R`.
    pub async fn complete_as<R: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
    ) -> Result<R, GatewayError> {
        if request.response_schema().is_none() {
            return Err(GatewayError::InvalidRequest(
                "Typed completions need a response schema.".to_string(),
            ));
        }

        let value = self.complete(request).await?.into_value();
        serde_json::from_value(value).map_err(|e| GatewayError::MalformedResponse {
            message: format!(
                "response does not fit {}",
                std::any::type_name::<R>()
            ),
            source: Some(Box::new(e)),
        })
    }

    pub async fn complete_text(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        Ok(self.complete(request).await?.into_text())
    }

    /// [`complete`](Self::complete) bounded by `limit`. Expiry is reported as
    /// a transport failure; the abandoned request is dropped.
    pub async fn complete_within(
        &self,
        request: &GenerationRequest,
        limit: Duration,
    ) -> Result<GenerationResult, GatewayError> {
        match tokio::time::timeout(limit, self.complete(request)).await {
            Ok(result) => result,
            Err(elapsed) => Err(GatewayError::Transport {
                message: format!("No response within {limit:?}"),
                status_code: None,
                source: Some(Box::new(elapsed)),
            }),
        }
    }
}

fn parse_structured(text: Option<&str>, schema: &SchemaDescriptor) -> Result<Value, GatewayError> {
    let text = text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GatewayError::malformed("provider returned no text for a structured request"))?;

    let value: Value = serde_json::from_str(text).map_err(|e| GatewayError::MalformedResponse {
        message: "response text is not valid JSON".to_string(),
        source: Some(Box::new(e)),
    })?;

    schema.validate_value(&value)?;
    Ok(value)
}
