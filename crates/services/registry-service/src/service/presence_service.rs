//! Presence toggle - a singer's online/offline flag.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;

use super::{update_singer, WriteGate};
use crate::repository::RecordRepository;

#[async_trait]
pub trait PresenceService: Send + Sync {
    /// Flip `is_online` for one singer and return the new value
    async fn toggle_online(&self, singer_id: Uuid) -> AppResult<bool>;
}

pub struct PresenceToggle {
    repo: Arc<dyn RecordRepository>,
    gate: WriteGate,
}

impl PresenceToggle {
    pub fn new(repo: Arc<dyn RecordRepository>, gate: WriteGate) -> Self {
        Self { repo, gate }
    }
}

#[async_trait]
impl PresenceService for PresenceToggle {
    async fn toggle_online(&self, singer_id: Uuid) -> AppResult<bool> {
        let online = update_singer(self.repo.as_ref(), &self.gate, singer_id, |singer| {
            Ok(singer.toggle_online())
        })
        .await?;

        tracing::debug!(%singer_id, online, "Presence toggled");
        Ok(online)
    }
}
