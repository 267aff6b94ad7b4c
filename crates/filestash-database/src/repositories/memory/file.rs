//! In-memory file repository.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use filestash_core::error::AppError;
use filestash_core::result::AppResult;
use filestash_core::types::{FileId, PageRequest, ParentRef, UserId};
use filestash_entity::file::{CreateFileRecord, FileRecord};

use crate::repositories::FileRepository;

/// Arena of records plus the indexes listing and subtree walks need.
#[derive(Debug, Default)]
struct InnerState {
    /// Last assigned sequence number.
    last_seq: i64,
    records: HashMap<FileId, FileRecord>,
    /// Creation order.
    by_seq: BTreeMap<i64, FileId>,
    /// Direct children of each folder.
    children: HashMap<FileId, Vec<FileId>>,
}

impl InnerState {
    fn page(&self, page: &PageRequest, filter: impl Fn(&FileRecord) -> bool) -> Vec<FileRecord> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        self.by_seq
            .values()
            .filter_map(|id| self.records.get(id))
            .filter(|record| filter(record))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// File records held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRepository {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn insert(&self, data: CreateFileRecord) -> AppResult<FileRecord> {
        let mut state = self.state.write().await;
        if state.records.contains_key(&data.id) {
            return Err(AppError::conflict(format!("File {} already exists", data.id)));
        }

        state.last_seq += 1;
        let record = data.into_record(state.last_seq, Utc::now());

        state.by_seq.insert(record.seq, record.id);
        if let Some(parent) = record.parent_id {
            state.children.entry(parent).or_default().push(record.id);
        }
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileRecord>> {
        Ok(self.state.read().await.records.get(&id).cloned())
    }

    async fn find_by_parent(
        &self,
        owner: UserId,
        parent: ParentRef,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        let state = self.state.read().await;
        Ok(state.page(page, move |record| {
            record.user_id == owner && record.parent() == parent
        }))
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        let state = self.state.read().await;
        Ok(state.page(page, move |record| record.user_id == owner))
    }

    async fn set_public(
        &self,
        id: FileId,
        owner: UserId,
        is_public: bool,
    ) -> AppResult<Option<FileRecord>> {
        let mut state = self.state.write().await;
        match state.records.get_mut(&id) {
            Some(record) if record.is_owned_by(owner) => {
                record.is_public = is_public;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_subtree(&self, root: FileId) -> AppResult<Vec<FileRecord>> {
        let state = self.state.read().await;
        let mut collected = Vec::new();
        let mut queue = VecDeque::from([root]);

        while let Some(id) = queue.pop_front() {
            let Some(record) = state.records.get(&id) else {
                continue;
            };
            collected.push(record.clone());
            if let Some(children) = state.children.get(&id) {
                queue.extend(children.iter().copied());
            }
        }
        Ok(collected)
    }

    async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let mut removed = 0;

        for id in ids {
            let Some(record) = state.records.remove(id) else {
                continue;
            };
            removed += 1;
            state.by_seq.remove(&record.seq);
            state.children.remove(id);
            if let Some(parent) = record.parent_id {
                if let Some(siblings) = state.children.get_mut(&parent) {
                    siblings.retain(|child| child != id);
                }
            }
        }
        Ok(removed)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.state.read().await.records.len() as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
