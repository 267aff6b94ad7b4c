//! In-memory user repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use filestash_core::error::AppError;
use filestash_core::result::AppResult;
use filestash_core::types::UserId;
use filestash_entity::user::{CreateUser, User};

use crate::repositories::UserRepository;

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// Users held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.by_email.contains_key(&data.email) {
            return Err(AppError::conflict(format!(
                "User '{}' already exists",
                data.email
            )));
        }

        let user = User {
            id: UserId::new(),
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        state.by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.state.read().await.users.len() as u64)
    }
}
