//! Roles, persisted session descriptor and the client login state machine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::judge::JudgeRecord;
use crate::singer::SingerRecord;

/// Roles a client can sign in as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Singer,
    Judge,
    Admin,
}

impl Role {
    /// Whether this role signs in with a public code as well as a password
    pub fn requires_login_id(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Singer => write!(f, "SINGER"),
            Role::Judge => write!(f, "JUDGE"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Kinds of account the registry manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Singer,
    Judge,
}

impl From<IdentityKind> for Role {
    fn from(kind: IdentityKind) -> Self {
        match kind {
            IdentityKind::Singer => Role::Singer,
            IdentityKind::Judge => Role::Judge,
        }
    }
}

/// Persisted session descriptor: `{ "role": "SINGER", "activeId": "<uuid>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_id: Option<Uuid>,
}

impl Session {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            active_id: None,
        }
    }

    pub fn singer(id: Uuid) -> Self {
        Self {
            role: Role::Singer,
            active_id: Some(id),
        }
    }

    pub fn judge(id: Uuid) -> Self {
        Self {
            role: Role::Judge,
            active_id: Some(id),
        }
    }
}

/// An authenticated identity. Admin carries no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Admin,
    Singer(SingerRecord),
    Judge(JudgeRecord),
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::Admin => Role::Admin,
            Identity::Singer(_) => Role::Singer,
            Identity::Judge(_) => Role::Judge,
        }
    }

    /// Session descriptor to persist for this identity
    pub fn session(&self) -> Session {
        match self {
            Identity::Admin => Session::admin(),
            Identity::Singer(s) => Session::singer(s.id),
            Identity::Judge(j) => Session::judge(j.id),
        }
    }
}

/// Per-client login state machine.
///
/// `LoggedOut -> AwaitingCredentials -> Active -> LoggedOut`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClientState {
    #[default]
    LoggedOut,
    AwaitingCredentials(Role),
    Active(Identity),
}

impl ClientState {
    /// Pick a role on the landing screen
    pub fn choose_role(self, role: Role) -> DomainResult<Self> {
        match self {
            ClientState::LoggedOut | ClientState::AwaitingCredentials(_) => {
                Ok(ClientState::AwaitingCredentials(role))
            }
            ClientState::Active(identity) => Err(DomainError::validation(format!(
                "already signed in as {}",
                identity.role()
            ))),
        }
    }

    /// Enter the active state after successful authentication
    pub fn activate(self, identity: Identity) -> DomainResult<Self> {
        match self {
            ClientState::AwaitingCredentials(role) if role == identity.role() => {
                Ok(ClientState::Active(identity))
            }
            ClientState::AwaitingCredentials(role) => Err(DomainError::validation(format!(
                "expected {} credentials, got {}",
                role,
                identity.role()
            ))),
            _ => Err(DomainError::validation("no role chosen")),
        }
    }

    /// Always lands in `LoggedOut`
    pub fn logout(self) -> Self {
        ClientState::LoggedOut
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            ClientState::Active(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ClientState::Active(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_format() {
        let admin = serde_json::to_value(Session::admin()).unwrap();
        assert_eq!(admin, serde_json::json!({ "role": "ADMIN" }));

        let id = Uuid::new_v4();
        let singer = serde_json::to_value(Session::singer(id)).unwrap();
        assert_eq!(singer["role"], "SINGER");
        assert_eq!(singer["activeId"], id.to_string());
    }

    #[test]
    fn test_state_machine_happy_path() {
        let state = ClientState::default()
            .choose_role(Role::Admin)
            .unwrap()
            .activate(Identity::Admin)
            .unwrap();
        assert!(state.is_active());
        assert_eq!(state.logout(), ClientState::LoggedOut);
    }

    #[test]
    fn test_activate_requires_matching_role() {
        let state = ClientState::default().choose_role(Role::Judge).unwrap();
        assert!(state.activate(Identity::Admin).is_err());
        assert!(ClientState::LoggedOut.activate(Identity::Admin).is_err());
    }

    #[test]
    fn test_cannot_choose_role_while_active() {
        let state = ClientState::Active(Identity::Admin);
        assert!(state.choose_role(Role::Singer).is_err());
    }
}
