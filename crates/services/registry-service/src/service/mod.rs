//! Service layer - registry business logic.

pub mod credentials;
mod identity_service;
mod order_service;
mod presence_service;
mod session_service;

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::SingerRecord;

use crate::repository::RecordRepository;

pub use credentials::{CredentialGenerator, IssuedCredentials, RandomCredentials};
pub use identity_service::{IdentityEdit, IdentityRegistry, IdentityService};
pub use order_service::{OrderService, OrderView, OrderWorkflow, PendingOrder};
pub use presence_service::{PresenceService, PresenceToggle};
pub use session_service::{SessionManager, SessionService};

/// Serializes load-modify-save cycles across all services sharing it.
pub type WriteGate = Arc<Mutex<()>>;

/// Apply `f` to one singer and persist the whole list.
///
/// Nothing is written when the singer is missing or `f` fails.
pub(crate) async fn update_singer<T, F>(
    repo: &dyn RecordRepository,
    gate: &Mutex<()>,
    singer_id: Uuid,
    f: F,
) -> AppResult<T>
where
    F: FnOnce(&mut SingerRecord) -> AppResult<T> + Send,
    T: Send,
{
    let _guard = gate.lock().await;
    let mut singers = repo.load_singers().await?;
    let singer = singers
        .iter_mut()
        .find(|s| s.id == singer_id)
        .ok_or_not_found()?;
    let result = f(singer)?;
    repo.save_singers(&singers).await?;
    Ok(result)
}
