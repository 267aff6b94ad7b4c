//! HTTP Basic credentials.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Email and password decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode a raw `Authorization` header value.
    ///
    /// Returns `None` for any other scheme, undecodable payloads, or a
    /// payload without a `:` separator. The password may itself contain `:`.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;

        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
