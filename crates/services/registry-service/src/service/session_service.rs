//! Session manager - persisted login state and its reconciliation at startup.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::{ClientState, Identity, Role, Session};

use super::IdentityService;
use crate::repository::RecordRepository;

/// Session service trait for dependency injection.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Resolve the persisted session against current records.
    ///
    /// Stale or unreadable sessions yield `LoggedOut`, never an error.
    async fn restore_session(&self) -> AppResult<ClientState>;

    /// Persist a session descriptor
    async fn establish_session(&self, session: &Session) -> AppResult<()>;

    /// Remove the session descriptor
    async fn clear_session(&self) -> AppResult<()>;

    /// Authenticate and, on success, establish the session
    async fn login(&self, role: Role, login_id: &str, password: &str) -> AppResult<Identity>;

    async fn logout(&self) -> AppResult<()>;
}

/// Concrete implementation of SessionService.
pub struct SessionManager {
    repo: Arc<dyn RecordRepository>,
    identities: Arc<dyn IdentityService>,
}

impl SessionManager {
    pub fn new(repo: Arc<dyn RecordRepository>, identities: Arc<dyn IdentityService>) -> Self {
        Self { repo, identities }
    }

    async fn resolve(&self, session: &Session) -> AppResult<Option<Identity>> {
        let identity = match (session.role, session.active_id) {
            (Role::Admin, _) if self.identities.admin_login_enabled() => Some(Identity::Admin),
            (Role::Admin, _) => {
                tracing::warn!("Admin session found but admin login is disabled");
                None
            }
            (Role::Singer, Some(id)) => self
                .repo
                .load_singers()
                .await?
                .into_iter()
                .find(|s| s.id == id && !s.is_banned)
                .map(Identity::Singer),
            (Role::Judge, Some(id)) => self
                .repo
                .load_judges()
                .await?
                .into_iter()
                .find(|j| j.id == id)
                .map(Identity::Judge),
            (_, None) => None,
        };
        Ok(identity)
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn restore_session(&self) -> AppResult<ClientState> {
        let session = match self.repo.load_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return Ok(ClientState::LoggedOut),
            Err(AppError::Serialization(e)) => {
                tracing::warn!(error = %e, "Ignoring unreadable session");
                return Ok(ClientState::LoggedOut);
            }
            Err(e) => return Err(e),
        };

        match self.resolve(&session).await? {
            Some(identity) => {
                tracing::debug!(role = %session.role, "Session restored");
                Ok(ClientState::Active(identity))
            }
            None => {
                tracing::warn!(role = %session.role, "Stale session discarded");
                Ok(ClientState::LoggedOut)
            }
        }
    }

    async fn establish_session(&self, session: &Session) -> AppResult<()> {
        self.repo.save_session(session).await
    }

    async fn clear_session(&self) -> AppResult<()> {
        self.repo.clear_session().await
    }

    async fn login(&self, role: Role, login_id: &str, password: &str) -> AppResult<Identity> {
        let awaiting = ClientState::default().choose_role(role)?;
        let identity = self.identities.authenticate(role, login_id, password).await?;

        let state = awaiting.activate(identity)?;
        let identity = match state {
            ClientState::Active(identity) => identity,
            _ => return Err(AppError::internal("activation did not produce a session")),
        };

        self.establish_session(&identity.session()).await?;
        tracing::info!(role = %role, "Login succeeded");
        Ok(identity)
    }

    async fn logout(&self) -> AppResult<()> {
        self.clear_session().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRecordRepository;
    use crate::service::credentials::testing::FixedCredentials;
    use crate::service::{IdentityRegistry, WriteGate};
    use domain::{JudgeRecord, SingerRecord};

    fn manager(repo: MockRecordRepository) -> SessionManager {
        manager_with_admin(repo, Some("admin-secret"))
    }

    fn manager_with_admin(repo: MockRecordRepository, admin_password: Option<&str>) -> SessionManager {
        let repo: Arc<dyn RecordRepository> = Arc::new(repo);
        let identities = Arc::new(IdentityRegistry::new(
            repo.clone(),
            Arc::new(FixedCredentials::new(&[])),
            admin_password.map(str::to_string),
            WriteGate::default(),
        ));
        SessionManager::new(repo, identities)
    }

    #[tokio::test]
    async fn test_no_session_is_logged_out() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_session().returning(|| Ok(None));

        let state = manager(repo).restore_session().await.unwrap();
        assert_eq!(state, ClientState::LoggedOut);
    }

    #[tokio::test]
    async fn test_session_for_deleted_singer_is_logged_out() {
        let ghost = uuid::Uuid::new_v4();
        let mut repo = MockRecordRepository::new();
        repo.expect_load_session()
            .returning(move || Ok(Some(Session::singer(ghost))));
        repo.expect_load_singers().returning(|| Ok(vec![]));

        let state = manager(repo).restore_session().await.unwrap();
        assert_eq!(state, ClientState::LoggedOut);
    }

    #[tokio::test]
    async fn test_session_for_banned_singer_is_logged_out() {
        let mut singer = SingerRecord::new("SM-1000".to_string(), "1".to_string());
        singer.set_banned(true);
        let id = singer.id;

        let mut repo = MockRecordRepository::new();
        repo.expect_load_session()
            .returning(move || Ok(Some(Session::singer(id))));
        repo.expect_load_singers()
            .returning(move || Ok(vec![singer.clone()]));

        let state = manager(repo).restore_session().await.unwrap();
        assert!(!state.is_active());
    }

    #[tokio::test]
    async fn test_judge_session_restores() {
        let judge = JudgeRecord::new("JDG-1000".to_string(), "1".to_string(), 1);
        let id = judge.id;

        let mut repo = MockRecordRepository::new();
        repo.expect_load_session()
            .returning(move || Ok(Some(Session::judge(id))));
        repo.expect_load_judges()
            .returning(move || Ok(vec![judge.clone()]));

        let state = manager(repo).restore_session().await.unwrap();
        assert_eq!(state.identity().map(Identity::role), Some(Role::Judge));
    }

    #[tokio::test]
    async fn test_unreadable_session_is_logged_out() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_session().returning(|| {
            Err(AppError::Serialization(
                serde_json::from_str::<Session>("{").unwrap_err(),
            ))
        });

        let state = manager(repo).restore_session().await.unwrap();
        assert_eq!(state, ClientState::LoggedOut);
    }

    #[tokio::test]
    async fn test_failed_login_establishes_nothing() {
        let mut repo = MockRecordRepository::new();
        repo.expect_save_session().never();

        let result = manager(repo).login(Role::Admin, "", "wrong").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_admin_login_persists_role_only() {
        let mut repo = MockRecordRepository::new();
        repo.expect_save_session()
            .withf(|session| *session == Session::admin())
            .times(1)
            .returning(|_| Ok(()));

        let identity = manager(repo).login(Role::Admin, "", "admin-secret").await.unwrap();
        assert_eq!(identity, Identity::Admin);
    }

    #[tokio::test]
    async fn test_admin_session_restores_when_secret_configured() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_session().returning(|| Ok(Some(Session::admin())));

        let state = manager(repo).restore_session().await.unwrap();
        assert_eq!(state, ClientState::Active(Identity::Admin));
    }

    #[tokio::test]
    async fn test_admin_session_is_logged_out_without_secret() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_session().returning(|| Ok(Some(Session::admin())));
        repo.expect_save_session().never();

        let manager = manager_with_admin(repo, None);
        assert!(matches!(
            manager.login(Role::Admin, "", "anything").await,
            Err(AppError::InvalidCredentials)
        ));

        let state = manager.restore_session().await.unwrap();
        assert_eq!(state, ClientState::LoggedOut);
    }
}
