pub mod credential;
pub mod error;
pub mod http;
pub mod schema;
pub mod transport;
pub mod types;

pub use credential::{ApiKey, Credential};
pub use error::GatewayError;
pub use http::{HttpClient, HttpClientConfig};
pub use schema::{SchemaDescriptor, SchemaKind};
pub use transport::{ProviderCall, Transport};
pub use types::{GenerationRequest, GenerationResult};
