//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an issued session token in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Request header carrying the session token.
    #[serde(default = "default_token_header")]
    pub token_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: default_token_ttl(),
            token_header: default_token_header(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}

fn default_token_header() -> String {
    "x-token".to_string()
}
