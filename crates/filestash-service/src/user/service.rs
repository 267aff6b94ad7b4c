//! User registration and the caller's own profile.

use std::sync::Arc;

use tracing::info;

use filestash_auth::PasswordHasher;
use filestash_core::error::{AppError, ErrorKind};
use filestash_database::repositories::UserRepository;
use filestash_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Registration payload as the client sent it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Handles user registration and profile lookup.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user with a unique email.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, AppError> {
        let email = req
            .email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::validation("Missing email"))?;
        let password = req
            .password
            .filter(|password| !password.is_empty())
            .ok_or_else(|| AppError::validation("Missing password"))?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Already exist"));
        }

        let password_hash = self.hasher.hash_password(&password)?;
        let user = self
            .users
            .create(CreateUser {
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e.kind {
                // Lost a race with a concurrent registration.
                ErrorKind::Conflict => AppError::validation("Already exist"),
                _ => e,
            })?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// The caller's own user record.
    pub async fn get_me(&self, ctx: Option<&RequestContext>) -> Result<User, AppError> {
        let ctx = RequestContext::require(ctx)?;
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(AppError::unauthenticated)
    }
}
