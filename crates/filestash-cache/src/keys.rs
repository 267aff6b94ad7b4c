//! Cache key builders.

/// Key under which a session token maps to its user id.
pub fn auth_token(token: &str) -> String {
    format!("auth_{token}")
}
