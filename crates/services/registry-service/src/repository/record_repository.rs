//! Record repository: the three persisted values behind typed accessors.
//!
//! Every save writes the complete list, mirroring the in-memory state after
//! each mutation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use common::{AppResult, StoreKeys};
use domain::{JudgeRecord, Session, SingerRecord};

use crate::infra::KeyValueStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Record repository trait for dependency injection.
///
/// Missing lists read as empty; a missing session reads as `None`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Load all singer records (newest first)
    async fn load_singers(&self) -> AppResult<Vec<SingerRecord>>;

    /// Replace the persisted singer list
    async fn save_singers(&self, singers: &[SingerRecord]) -> AppResult<()>;

    /// Load all judge records (creation order)
    async fn load_judges(&self) -> AppResult<Vec<JudgeRecord>>;

    /// Replace the persisted judge list
    async fn save_judges(&self, judges: &[JudgeRecord]) -> AppResult<()>;

    /// Load the active session descriptor
    async fn load_session(&self) -> AppResult<Option<Session>>;

    /// Persist the active session descriptor
    async fn save_session(&self, session: &Session) -> AppResult<()>;

    /// Remove the session descriptor
    async fn clear_session(&self) -> AppResult<()>;
}

/// Concrete implementation of RecordRepository over a key-value store
pub struct RecordStore {
    store: Arc<dyn KeyValueStore>,
    keys: StoreKeys,
}

impl RecordStore {
    /// Create new repository instance
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StoreKeys) -> Self {
        Self { store, keys }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.store.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, json).await
    }
}

#[async_trait]
impl RecordRepository for RecordStore {
    async fn load_singers(&self) -> AppResult<Vec<SingerRecord>> {
        Ok(self.read(&self.keys.singers).await?.unwrap_or_default())
    }

    async fn save_singers(&self, singers: &[SingerRecord]) -> AppResult<()> {
        self.write(&self.keys.singers, singers).await
    }

    async fn load_judges(&self) -> AppResult<Vec<JudgeRecord>> {
        Ok(self.read(&self.keys.judges).await?.unwrap_or_default())
    }

    async fn save_judges(&self, judges: &[JudgeRecord]) -> AppResult<()> {
        self.write(&self.keys.judges, judges).await
    }

    async fn load_session(&self) -> AppResult<Option<Session>> {
        self.read(&self.keys.session).await
    }

    async fn save_session(&self, session: &Session) -> AppResult<()> {
        self.write(&self.keys.session, session).await
    }

    async fn clear_session(&self) -> AppResult<()> {
        self.store.remove(&self.keys.session).await
    }
}
