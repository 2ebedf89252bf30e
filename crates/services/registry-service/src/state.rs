//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::infra::{open_store, KeyValueStore};
use crate::repository::{RecordRepository, RecordStore};
use crate::service::{
    CredentialGenerator, IdentityRegistry, IdentityService, OrderService, OrderWorkflow,
    PresenceService, PresenceToggle, RandomCredentials, SessionManager, SessionService, WriteGate,
};
use common::AppResult;

/// Every registry service, wired over one store and one write gate.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityService>,
    pub orders: Arc<dyn OrderService>,
    pub presence: Arc<dyn PresenceService>,
    pub sessions: Arc<dyn SessionService>,
}

impl AppState {
    /// Open the configured store and build the services.
    pub async fn from_config(config: &RegistryConfig) -> AppResult<Self> {
        let store = open_store(&config.store).await?;
        Ok(Self::with_store(
            store,
            config,
            Arc::new(RandomCredentials),
        ))
    }

    /// Build the services over an already opened store.
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialGenerator>,
    ) -> Self {
        let repo: Arc<dyn RecordRepository> =
            Arc::new(RecordStore::new(store, config.store.keys()));
        let gate = WriteGate::default();

        let identities: Arc<dyn IdentityService> = Arc::new(IdentityRegistry::new(
            repo.clone(),
            credentials,
            config.admin_password().map(str::to_string),
            gate.clone(),
        ));
        let orders = Arc::new(OrderWorkflow::new(repo.clone(), gate.clone()));
        let presence = Arc::new(PresenceToggle::new(repo.clone(), gate));
        let sessions = Arc::new(SessionManager::new(repo, identities.clone()));

        Self {
            identities,
            orders,
            presence,
            sessions,
        }
    }
}
