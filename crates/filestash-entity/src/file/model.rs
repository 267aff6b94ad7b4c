//! File entity model.

use chrono::{DateTime, Utc};
use filestash_core::types::{FileId, ParentRef, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::file_type::FileType;

/// A file, image, or folder owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique item identifier.
    pub id: FileId,
    /// The owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Item type.
    pub file_type: FileType,
    /// Whether non-owners may read the item.
    pub is_public: bool,
    /// Containing folder; `None` at the owner's root.
    pub parent_id: Option<FileId>,
    /// Blob location. Always `None` for folders.
    pub local_path: Option<String>,
    /// Monotonic creation sequence used for listing order.
    pub seq: i64,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Where the item lives.
    pub fn parent(&self) -> ParentRef {
        ParentRef::from(self.parent_id)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether the given caller (if any) may read this item.
    pub fn is_readable_by(&self, caller: Option<UserId>) -> bool {
        self.is_public || caller.is_some_and(|user_id| self.is_owned_by(user_id))
    }
}

/// Data required to create a new item record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Identifier to assign.
    pub id: FileId,
    /// The owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Item type.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Containing folder.
    pub parent: ParentRef,
    /// Blob location for non-folders.
    pub local_path: Option<String>,
}

impl CreateFileRecord {
    /// Materialize the record with the store-assigned sequence number.
    pub fn into_record(self, seq: i64, created_at: DateTime<Utc>) -> FileRecord {
        FileRecord {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            file_type: self.file_type,
            is_public: self.is_public,
            parent_id: self.parent.folder_id(),
            local_path: self.local_path,
            seq,
            created_at,
        }
    }
}
