//! Google Gemini `generateContent` transport.
//!
//! Only the fields the gateway reads or writes are modelled; everything else
//! in the provider's payloads is ignored on decode.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{GatewayError, HttpClient, HttpClientConfig, ProviderCall, Transport};
use crate::provider::constants::gemini;

/// Gemini-specific configuration for the transport
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self {
            base_url: gemini::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

pub struct GeminiTransport {
    config: GeminiConfig,
    http: HttpClient,
}

impl GeminiTransport {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let http = HttpClient::new(&config.http_config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(
        &self,
        credential: &str,
        call: ProviderCall<'_>,
    ) -> Result<Option<String>, GatewayError> {
        let url = self.config.endpoint(call.model);
        let headers = [(gemini::API_KEY_HEADER.to_string(), credential.to_string())];
        let request = build_request(&call);

        let response: GenerateContentResponse = self.http.post_json(&url, &headers, &request).await?;
        Ok(response.into_text())
    }
}

fn build_request<'a>(call: &ProviderCall<'a>) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: call.prompt }],
        }],
        system_instruction: call.system_instruction.map(|text| SystemInstruction {
            parts: vec![Part { text }],
        }),
        generation_config: call.response_schema.map(|schema| GenerationConfig {
            response_mime_type: gemini::JSON_MIME_TYPE,
            response_schema: schema.to_provider_schema(),
        }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer.
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate.
    fn into_text(self) -> Option<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            debug!(block_reason = %reason, "Prompt was blocked by the provider");
        }

        let candidate = self.candidates.into_iter().next()?;
        if let Some(reason) = &candidate.finish_reason {
            debug!(finish_reason = %reason, "Candidate finished");
        }

        let texts: Vec<String> = candidate
            .content?
            .parts
            .into_iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text)
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}
