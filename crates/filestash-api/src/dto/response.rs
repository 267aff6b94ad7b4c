//! Outgoing response bodies.

use serde::{Deserialize, Serialize};

use filestash_core::types::{FileId, ParentRef, UserId};
use filestash_entity::file::{FileRecord, FileType};
use filestash_entity::user::User;
use filestash_service::{SystemStats, SystemStatus};

/// Wire rendering of a file, image, or folder record.
///
/// The blob path never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: FileId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub is_public: bool,
    pub parent_id: ParentRef,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            parent_id: record.parent(),
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            file_type: record.file_type,
            is_public: record.is_public,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Body of `GET /status`.
///
/// The cache flag is named `redis` whichever cache backend is configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusResponse {
    pub redis: bool,
    pub db: bool,
}

impl From<SystemStatus> for StatusResponse {
    fn from(status: SystemStatus) -> Self {
        Self {
            redis: status.cache,
            db: status.database,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatsResponse {
    pub users: u64,
    pub files: u64,
}

impl From<SystemStats> for StatsResponse {
    fn from(stats: SystemStats) -> Self {
        Self {
            users: stats.users,
            files: stats.files,
        }
    }
}
