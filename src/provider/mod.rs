pub(crate) mod constants;
pub(crate) mod gemini;

pub use constants::gemini::{API_KEY_ENV_VAR, DEFAULT_MODEL};
pub use gemini::{GeminiConfig, GeminiTransport};
