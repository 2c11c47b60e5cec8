//! # studyai
//!
//! Schema-validated prompt completions against Google Gemini, and the study
//! aids built on top of them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studyai::{ApiKey, Gateway, GenerationRequest, SchemaDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::gemini(ApiKey::Default)?;
//!
//! let schema = SchemaDescriptor::array(
//!     SchemaDescriptor::object()
//!         .required_property("question", SchemaDescriptor::string())
//!         .required_property("answer", SchemaDescriptor::string()),
//! );
//! let request = GenerationRequest::new("gemini-3-flash-preview", "Generate 5 flashcards about optics")
//!     .with_response_schema(schema);
//!
//! let result = gateway.complete(&request).await?;
//! println!("{:?}", result.as_structured());
//! Ok(())
//! }
//! ```
//!
//! Failures are reported as [`GatewayError`]. Nothing is retried: each
//! `complete` call makes at most one request.

pub mod completions;
pub mod core;
pub mod provider;
pub mod study;

pub use completions::Gateway;
pub use crate::core::{
    ApiKey, Credential, GatewayError, GenerationRequest, GenerationResult, HttpClientConfig,
    ProviderCall, SchemaDescriptor, SchemaKind, Transport,
};
pub use provider::{GeminiConfig, GeminiTransport};
pub use study::{NO_ANSWER_FALLBACK, StudyAids};
