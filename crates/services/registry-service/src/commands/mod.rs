//! Command implementations.
//!
//! Each command restores the persisted session first and refuses to run for
//! the wrong role.

pub mod admin;
pub mod judge;
pub mod session;
pub mod singer;

use common::{AppError, AppResult};
use domain::{ClientState, Identity, JudgeRecord, Role, SingerRecord};

use crate::cli::Commands;
use crate::state::AppState;

/// Dispatch a parsed command.
pub async fn execute(command: Commands, state: &AppState) -> AppResult<()> {
    match command {
        Commands::Login(args) => session::login(args, state).await,
        Commands::Logout => session::logout(state).await,
        Commands::Whoami => session::whoami(state).await,
        Commands::Singers { action } => admin::singers(action, state).await,
        Commands::Judges { action } => admin::judges(action, state).await,
        Commands::Orders { action } => judge::orders(action, state).await,
        Commands::Me { action } => singer::me(action, state).await,
    }
}

/// Active identity, provided it has the required role.
pub(crate) async fn require_role(state: &AppState, role: Role) -> AppResult<Identity> {
    match state.sessions.restore_session().await? {
        ClientState::Active(identity) if identity.role() == role => Ok(identity),
        ClientState::Active(_) => Err(AppError::Forbidden),
        _ => Err(AppError::Unauthorized),
    }
}

pub(crate) async fn require_admin(state: &AppState) -> AppResult<()> {
    require_role(state, Role::Admin).await.map(|_| ())
}

pub(crate) async fn require_judge(state: &AppState) -> AppResult<JudgeRecord> {
    match require_role(state, Role::Judge).await? {
        Identity::Judge(judge) => Ok(judge),
        _ => Err(AppError::Forbidden),
    }
}

pub(crate) async fn require_singer(state: &AppState) -> AppResult<SingerRecord> {
    match require_role(state, Role::Singer).await? {
        Identity::Singer(singer) => Ok(singer),
        _ => Err(AppError::Forbidden),
    }
}

/// Ask before a destructive action unless `assume_yes`.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("confirmation prompt failed: {}", e)))
}
