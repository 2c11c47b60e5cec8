use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// No usable credential was configured when the gateway was built.
    #[error("Missing credential: set {env_var} or pass an API key explicitly")]
    MissingCredential { env_var: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl GatewayError {
    /// Only transport failures are worth repeating with the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    pub(crate) fn invalid_schema(path: &str, message: impl Into<String>) -> Self {
        GatewayError::InvalidSchema {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        GatewayError::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }
}
