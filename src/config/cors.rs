//! Cross-origin response headers configuration.

use std::env;

/// Headers stamped onto every response so browsers may call the API directly
#[derive(Clone, Debug)]
pub struct CorsHeadersConfig {
    pub allow_origin: String,
    /// Sent as `Access-Control-Request-Method`. Informational only.
    pub request_method: String,
}

impl Default for CorsHeadersConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            request_method: "GET".to_string(),
        }
    }
}

impl CorsHeadersConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let allow_origin = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let request_method =
            env::var("CORS_REQUEST_METHOD").unwrap_or_else(|_| "GET".to_string());

        Self {
            allow_origin,
            request_method,
        }
    }
}
