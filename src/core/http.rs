//! Thin JSON-over-HTTP client shared by providers.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::GatewayError;

/// HTTP client settings.
///
/// There is no retry policy: every call is at-most-once.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Per-request timeout. `None` waits as long as the provider does.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, GatewayError> {
        let default_ua = format!("studyai/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| GatewayError::Transport {
            message: "Failed to build HTTP client".to_string(),
            status_code: None,
            source: Some(Box::new(e)),
        })?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode a JSON reply.
    ///
    /// Connection failures, non-2xx statuses and undecodable bodies all
    /// surface as [`GatewayError::Transport`].
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, GatewayError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                message: "Request to provider failed".to_string(),
                status_code: e.status().map(|status| status.as_u16()),
                source: Some(Box::new(e)),
            })?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Transport {
                message: format!("Provider returned {status}: {error_text}"),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(status = %status, "HTTP request successful");

        let response_text = res.text().await.map_err(|e| GatewayError::Transport {
            message: "Failed to read response body".to_string(),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_str(&response_text).map_err(|e| GatewayError::Transport {
            message: "Failed to decode provider response".to_string(),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }
}
