use std::sync::Arc;

use async_trait::async_trait;

use super::{error::GatewayError, schema::SchemaDescriptor, types::GenerationRequest};

/// The parts of a request a provider needs to see.
#[derive(Debug, Clone, Copy)]
pub struct ProviderCall<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system_instruction: Option<&'a str>,
    pub response_schema: Option<&'a SchemaDescriptor>,
}

impl<'a> From<&'a GenerationRequest> for ProviderCall<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            model: request.model(),
            prompt: request.prompt(),
            system_instruction: request.system_instruction(),
            response_schema: request.response_schema(),
        }
    }
}

/// One outbound generation call.
///
/// Implementations return the provider's text, or `None` when the provider
/// answered without any. They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(
        &self,
        credential: &str,
        call: ProviderCall<'_>,
    ) -> Result<Option<String>, GatewayError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn generate(
        &self,
        credential: &str,
        call: ProviderCall<'_>,
    ) -> Result<Option<String>, GatewayError> {
        (**self).generate(credential, call).await
    }
}
