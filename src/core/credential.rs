use std::fmt;

use crate::provider::constants::gemini;

use super::error::GatewayError;

/// Where the gateway should take its API key from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the provider's default environment variable.
    Default,
    /// Read a named environment variable.
    Env(String),
    /// Use the given value.
    Custom(String),
}

impl ApiKey {
    /// Resolve the key once. The environment is not consulted again afterwards.
    pub fn resolve(&self) -> Credential {
        match self {
            ApiKey::Default => Credential::from_env(gemini::API_KEY_ENV_VAR),
            ApiKey::Env(var) => Credential::from_env(var),
            ApiKey::Custom(value) => Credential::new(value.clone()),
        }
    }
}

/// An API key captured at gateway construction, or the absence of one.
#[derive(Clone)]
pub struct Credential {
    value: Option<String>,
    origin: String,
}

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: normalize(value.into()),
            origin: gemini::API_KEY_ENV_VAR.to_string(),
        }
    }

    pub fn from_env(var: &str) -> Self {
        Self {
            value: std::env::var(var).ok().and_then(normalize),
            origin: var.to_string(),
        }
    }

    pub fn missing() -> Self {
        Self {
            value: None,
            origin: gemini::API_KEY_ENV_VAR.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn require(&self) -> Result<&str, GatewayError> {
        self.value
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredential {
                env_var: self.origin.clone(),
            })
    }
}

// Build pipelines substitute the string "undefined" for unset variables.
fn normalize(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("configured", &self.is_configured())
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_placeholder_values_are_not_configured() {
        for raw in ["", "   ", "undefined", " undefined\n"] {
            let credential = Credential::new(raw);
            assert!(!credential.is_configured(), "{raw:?} should not count");
            assert!(matches!(
                credential.require(),
                Err(GatewayError::MissingCredential { .. })
            ));
        }
    }

    #[test]
    fn explicit_key_is_trimmed() {
        let credential = ApiKey::Custom("  secret-key \n".to_string()).resolve();
        assert_eq!(credential.require().unwrap(), "secret-key");
    }

    #[test]
    fn unset_environment_variable_reports_its_name() {
        let credential = ApiKey::Env("STUDYAI_TEST_SURELY_UNSET_VAR".to_string()).resolve();
        match credential.require() {
            Err(GatewayError::MissingCredential { env_var }) => {
                assert_eq!(env_var, "STUDYAI_TEST_SURELY_UNSET_VAR")
            }
            other => panic!("Expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_hides_the_key() {
        let credential = Credential::new("top-secret");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("configured: true"));
    }
}
