//! Session lifecycle manager: connect, resolve, and disconnect flows.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use filestash_cache::keys;
use filestash_core::config::AuthConfig;
use filestash_core::error::AppError;
use filestash_core::traits::cache::CacheProvider;
use filestash_core::types::UserId;
use filestash_database::repositories::UserRepository;
use filestash_entity::user::User;

use crate::credentials::BasicCredentials;
use crate::password::PasswordHasher;

/// Issues and resolves opaque session tokens.
///
/// A token is a random UUID stored in the cache as `auth_<token>` with
/// the user id as value, expiring after the configured TTL.
#[derive(Clone)]
pub struct SessionManager {
    cache: Arc<dyn CacheProvider>,
    users: Arc<dyn UserRepository>,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(
        cache: Arc<dyn CacheProvider>,
        users: Arc<dyn UserRepository>,
        password_hasher: PasswordHasher,
        config: &AuthConfig,
    ) -> Self {
        Self {
            cache,
            users,
            password_hasher,
            token_ttl: Duration::from_secs(config.token_ttl_seconds),
        }
    }

    /// Verify credentials and issue a new token.
    pub async fn connect(&self, credentials: &BasicCredentials) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(AppError::unauthenticated)?;

        if !self
            .password_hasher
            .verify_password(&credentials.password, &user.password_hash)?
        {
            debug!(email = %credentials.email, "Password mismatch");
            return Err(AppError::unauthenticated());
        }

        let token = Uuid::new_v4().to_string();
        self.cache
            .set(&keys::auth_token(&token), &user.id.to_string(), self.token_ttl)
            .await?;

        info!(user_id = %user.id, "User connected");
        Ok(token)
    }

    /// The user id a token belongs to, if the token is live.
    pub async fn resolve(&self, token: &str) -> Result<Option<UserId>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }
        let value = self.cache.get(&keys::auth_token(token)).await?;
        Ok(value.and_then(|raw| raw.parse::<UserId>().ok()))
    }

    /// Resolve a token all the way to its user.
    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        let user_id = self
            .resolve(token)
            .await?
            .ok_or_else(AppError::unauthenticated)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(AppError::unauthenticated)
    }

    /// Revoke a token. Unknown tokens are rejected.
    pub async fn disconnect(&self, token: &str) -> Result<(), AppError> {
        let user_id = self
            .resolve(token)
            .await?
            .ok_or_else(AppError::unauthenticated)?;
        self.cache.delete(&keys::auth_token(token)).await?;
        info!(user_id = %user_id, "User disconnected");
        Ok(())
    }
}
