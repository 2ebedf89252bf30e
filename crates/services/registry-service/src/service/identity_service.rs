//! Identity registry - account provisioning, editing and authentication.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    Identity, IdentityKind, JudgeRecord, Role, SingerRecord, JUDGE_CODE_PREFIX,
    SINGER_CODE_PREFIX,
};

use super::credentials::{self, CredentialGenerator, IssuedCredentials};
use super::{update_singer, WriteGate};
use crate::repository::RecordRepository;

/// Admin overwrite of an account's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityEdit {
    pub display_name: String,
    pub public_code: String,
    pub password: String,
}

/// Identity service trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Mint a blank singer account with fresh credentials
    async fn create_singer(&self) -> AppResult<IssuedCredentials>;

    /// Mint a judge account named "Specialist N"
    async fn create_judge(&self) -> AppResult<IssuedCredentials>;

    async fn list_singers(&self) -> AppResult<Vec<SingerRecord>>;

    async fn list_judges(&self) -> AppResult<Vec<JudgeRecord>>;

    async fn get_singer(&self, id: Uuid) -> AppResult<SingerRecord>;

    async fn get_judge(&self, id: Uuid) -> AppResult<JudgeRecord>;

    /// Whether an admin secret is configured at all
    fn admin_login_enabled(&self) -> bool;

    /// Check credentials for a role without touching the session
    async fn authenticate(&self, role: Role, login_id: &str, password: &str) -> AppResult<Identity>;

    /// Overwrite name, public code and password of one account
    async fn edit_identity(&self, kind: IdentityKind, id: Uuid, edit: IdentityEdit) -> AppResult<()>;

    /// Singer profile setup (name and optional avatar)
    async fn update_profile(
        &self,
        singer_id: Uuid,
        display_name: String,
        avatar: Option<String>,
    ) -> AppResult<SingerRecord>;

    /// Suspend or reinstate a singer
    async fn set_banned(&self, singer_id: Uuid, banned: bool) -> AppResult<SingerRecord>;

    /// Hard delete a singer together with its orders
    async fn delete_singer(&self, id: Uuid) -> AppResult<()>;

    /// Hard delete a judge; orders assigned to it keep the dangling id
    async fn delete_judge(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of IdentityService using the record repository.
pub struct IdentityRegistry {
    repo: Arc<dyn RecordRepository>,
    credentials: Arc<dyn CredentialGenerator>,
    admin_password: Option<String>,
    gate: WriteGate,
}

impl IdentityRegistry {
    /// Create a registry. Admin login is refused when `admin_password` is `None`.
    pub fn new(
        repo: Arc<dyn RecordRepository>,
        credentials: Arc<dyn CredentialGenerator>,
        admin_password: Option<String>,
        gate: WriteGate,
    ) -> Self {
        Self {
            repo,
            credentials,
            admin_password,
            gate,
        }
    }

    fn authenticate_admin(&self, password: &str) -> AppResult<Identity> {
        match &self.admin_password {
            Some(expected) if expected == password => Ok(Identity::Admin),
            Some(_) => Err(AppError::InvalidCredentials),
            None => {
                tracing::warn!("Admin login attempted but no admin password is configured");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

#[async_trait]
impl IdentityService for IdentityRegistry {
    fn admin_login_enabled(&self) -> bool {
        self.admin_password.is_some()
    }

    async fn create_singer(&self) -> AppResult<IssuedCredentials> {
        let _guard = self.gate.lock().await;
        let mut singers = self.repo.load_singers().await?;

        let (public_code, password) = {
            let taken: HashSet<&str> = singers.iter().map(|s| s.public_code.as_str()).collect();
            credentials::issue(self.credentials.as_ref(), SINGER_CODE_PREFIX, &taken)?
        };

        let singer = SingerRecord::new(public_code.clone(), password.clone());
        let issued = IssuedCredentials {
            id: singer.id,
            public_code,
            password,
        };
        singers.insert(0, singer);
        self.repo.save_singers(&singers).await?;

        tracing::info!(singer_id = %issued.id, code = %issued.public_code, "Singer account created");
        Ok(issued)
    }

    async fn create_judge(&self) -> AppResult<IssuedCredentials> {
        let _guard = self.gate.lock().await;
        let mut judges = self.repo.load_judges().await?;

        let (public_code, password) = {
            let taken: HashSet<&str> = judges.iter().map(|j| j.public_code.as_str()).collect();
            credentials::issue(self.credentials.as_ref(), JUDGE_CODE_PREFIX, &taken)?
        };

        let judge = JudgeRecord::new(public_code.clone(), password.clone(), judges.len() + 1);
        let issued = IssuedCredentials {
            id: judge.id,
            public_code,
            password,
        };
        judges.push(judge);
        self.repo.save_judges(&judges).await?;

        tracing::info!(judge_id = %issued.id, code = %issued.public_code, "Judge account created");
        Ok(issued)
    }

    async fn list_singers(&self) -> AppResult<Vec<SingerRecord>> {
        self.repo.load_singers().await
    }

    async fn list_judges(&self) -> AppResult<Vec<JudgeRecord>> {
        self.repo.load_judges().await
    }

    async fn get_singer(&self, id: Uuid) -> AppResult<SingerRecord> {
        self.repo
            .load_singers()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_not_found()
    }

    async fn get_judge(&self, id: Uuid) -> AppResult<JudgeRecord> {
        self.repo
            .load_judges()
            .await?
            .into_iter()
            .find(|j| j.id == id)
            .ok_or_not_found()
    }

    async fn authenticate(&self, role: Role, login_id: &str, password: &str) -> AppResult<Identity> {
        match role {
            Role::Admin => self.authenticate_admin(password),
            Role::Judge => self
                .repo
                .load_judges()
                .await?
                .into_iter()
                .find(|j| j.matches(login_id, password))
                .map(Identity::Judge)
                .ok_or(AppError::InvalidCredentials),
            Role::Singer => {
                let singer = self
                    .repo
                    .load_singers()
                    .await?
                    .into_iter()
                    .find(|s| s.matches(login_id, password))
                    .ok_or(AppError::InvalidCredentials)?;

                if singer.is_banned {
                    tracing::info!(singer_id = %singer.id, "Suspended singer attempted login");
                    return Err(AppError::AccountSuspended);
                }
                Ok(Identity::Singer(singer))
            }
        }
    }

    async fn edit_identity(&self, kind: IdentityKind, id: Uuid, edit: IdentityEdit) -> AppResult<()> {
        let IdentityEdit {
            display_name,
            public_code,
            password,
        } = edit;

        match kind {
            IdentityKind::Singer => {
                update_singer(self.repo.as_ref(), &self.gate, id, |singer| {
                    singer.update_credentials(display_name, public_code, password);
                    Ok(())
                })
                .await?
            }
            IdentityKind::Judge => {
                let _guard = self.gate.lock().await;
                let mut judges = self.repo.load_judges().await?;
                judges
                    .iter_mut()
                    .find(|j| j.id == id)
                    .ok_or_not_found()?
                    .update_credentials(display_name, public_code, password);
                self.repo.save_judges(&judges).await?;
            }
        }

        tracing::info!(%id, kind = ?kind, "Account edited");
        Ok(())
    }

    async fn update_profile(
        &self,
        singer_id: Uuid,
        display_name: String,
        avatar: Option<String>,
    ) -> AppResult<SingerRecord> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(AppError::validation("Display name cannot be empty"));
        }

        update_singer(self.repo.as_ref(), &self.gate, singer_id, |singer| {
            singer.set_profile(display_name, avatar);
            Ok(singer.clone())
        })
        .await
    }

    async fn set_banned(&self, singer_id: Uuid, banned: bool) -> AppResult<SingerRecord> {
        let singer = update_singer(self.repo.as_ref(), &self.gate, singer_id, |singer| {
            singer.set_banned(banned);
            Ok(singer.clone())
        })
        .await?;

        tracing::info!(%singer_id, banned, "Singer suspension updated");
        Ok(singer)
    }

    async fn delete_singer(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.gate.lock().await;
        let mut singers = self.repo.load_singers().await?;
        let before = singers.len();
        singers.retain(|s| s.id != id);
        if singers.len() == before {
            return Err(AppError::NotFound);
        }
        self.repo.save_singers(&singers).await?;

        tracing::info!(singer_id = %id, "Singer account deleted");
        Ok(())
    }

    async fn delete_judge(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.gate.lock().await;
        let mut judges = self.repo.load_judges().await?;
        let before = judges.len();
        judges.retain(|j| j.id != id);
        if judges.len() == before {
            return Err(AppError::NotFound);
        }
        self.repo.save_judges(&judges).await?;

        let orphaned = self
            .repo
            .load_singers()
            .await?
            .iter()
            .flat_map(|s| s.orders.iter())
            .filter(|o| o.assigned_judge_id == id)
            .count();
        if orphaned > 0 {
            tracing::warn!(judge_id = %id, orphaned, "Deleted judge still referenced by orders");
        }

        tracing::info!(judge_id = %id, "Judge account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRecordRepository;
    use crate::service::credentials::testing::FixedCredentials;

    fn registry(repo: MockRecordRepository, numbers: &[u16]) -> IdentityRegistry {
        IdentityRegistry::new(
            Arc::new(repo),
            Arc::new(FixedCredentials::new(numbers)),
            Some("admin-secret".to_string()),
            WriteGate::default(),
        )
    }

    fn singer(code: &str, password: &str) -> SingerRecord {
        SingerRecord::new(code.to_string(), password.to_string())
    }

    #[tokio::test]
    async fn test_create_singer_prepends_and_saves() {
        let existing = singer("SM-1000", "1111");
        let existing_id = existing.id;

        let mut repo = MockRecordRepository::new();
        repo.expect_load_singers()
            .returning(move || Ok(vec![existing.clone()]));
        repo.expect_save_singers()
            .withf(move |singers| {
                singers.len() == 2
                    && singers[0].public_code == "SM-4821"
                    && singers[0].password == "7734"
                    && singers[1].id == existing_id
            })
            .times(1)
            .returning(|_| Ok(()));

        let issued = registry(repo, &[4821, 7734]).create_singer().await.unwrap();
        assert_eq!(issued.public_code, "SM-4821");
        assert_eq!(issued.password, "7734");
    }

    #[tokio::test]
    async fn test_create_singer_skips_taken_code() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_singers()
            .returning(|| Ok(vec![singer("SM-4821", "1111")]));
        repo.expect_save_singers().returning(|_| Ok(()));

        let issued = registry(repo, &[4821, 5555, 2468]).create_singer().await.unwrap();
        assert_eq!(issued.public_code, "SM-5555");
        assert_eq!(issued.password, "2468");
    }

    #[tokio::test]
    async fn test_create_judge_names_by_roster_size() {
        let first = JudgeRecord::new("JDG-1000".to_string(), "1".to_string(), 1);

        let mut repo = MockRecordRepository::new();
        repo.expect_load_judges()
            .returning(move || Ok(vec![first.clone()]));
        repo.expect_save_judges()
            .withf(|judges| judges.len() == 2 && judges[1].display_name == "Specialist 2")
            .times(1)
            .returning(|_| Ok(()));

        let issued = registry(repo, &[2000, 3000]).create_judge().await.unwrap();
        assert_eq!(issued.public_code, "JDG-2000");
    }

    #[tokio::test]
    async fn test_authenticate_admin() {
        let reg = registry(MockRecordRepository::new(), &[]);
        assert_eq!(
            reg.authenticate(Role::Admin, "", "admin-secret").await.unwrap(),
            Identity::Admin
        );
        assert!(matches!(
            reg.authenticate(Role::Admin, "", "1234").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_admin_login_disabled_without_secret() {
        let reg = IdentityRegistry::new(
            Arc::new(MockRecordRepository::new()),
            Arc::new(FixedCredentials::new(&[])),
            None,
            WriteGate::default(),
        );
        assert!(matches!(
            reg.authenticate(Role::Admin, "", "").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_singer_requires_exact_match() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_singers()
            .returning(|| Ok(vec![singer("SM-4821", "7734")]));
        let reg = registry(repo, &[]);

        let identity = reg.authenticate(Role::Singer, "SM-4821", "7734").await.unwrap();
        assert_eq!(identity.role(), Role::Singer);

        for (code, password) in [("SM-4821", "0000"), ("SM-4822", "7734"), ("sm-4821", "7734")] {
            assert!(matches!(
                reg.authenticate(Role::Singer, code, password).await,
                Err(AppError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_banned_singer_is_suspended_not_authenticated() {
        let mut banned = singer("SM-4821", "7734");
        banned.set_banned(true);

        let mut repo = MockRecordRepository::new();
        repo.expect_load_singers()
            .returning(move || Ok(vec![banned.clone()]));
        let reg = registry(repo, &[]);

        assert!(matches!(
            reg.authenticate(Role::Singer, "SM-4821", "7734").await,
            Err(AppError::AccountSuspended)
        ));
        // Wrong password still reads as bad credentials
        assert!(matches!(
            reg.authenticate(Role::Singer, "SM-4821", "0000").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_edit_unknown_judge_writes_nothing() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_judges().returning(|| Ok(vec![]));
        repo.expect_save_judges().never();

        let edit = IdentityEdit {
            display_name: "X".to_string(),
            public_code: "JDG-1".to_string(),
            password: "p".to_string(),
        };
        let result = registry(repo, &[])
            .edit_identity(IdentityKind::Judge, Uuid::new_v4(), edit)
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_singer_is_not_found() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_singers()
            .returning(|| Ok(vec![singer("SM-1000", "1")]));
        repo.expect_save_singers().never();

        let result = registry(repo, &[]).delete_singer(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_blank_name() {
        let mut repo = MockRecordRepository::new();
        repo.expect_save_singers().never();

        let result = registry(repo, &[])
            .update_profile(Uuid::new_v4(), "  ".to_string(), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
