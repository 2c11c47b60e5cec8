pub mod gemini {
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
    pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
    pub const JSON_MIME_TYPE: &str = "application/json";
}
