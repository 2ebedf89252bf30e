//! Login, logout and whoami.

use common::{AppError, AppResult};
use domain::{ClientState, Identity, Role};

use crate::cli::args::LoginArgs;
use crate::state::AppState;

pub async fn login(args: LoginArgs, state: &AppState) -> AppResult<()> {
    let role = Role::from(args.role);

    let login_id = match (role.requires_login_id(), args.id) {
        (true, Some(id)) => id,
        (true, None) => return Err(AppError::validation(format!("--id is required for {}", role))),
        (false, _) => String::new(),
    };

    let password = match args.password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("password prompt failed: {}", e)))?,
    };

    let identity = state.sessions.login(role, &login_id, &password).await?;
    println!("Signed in as {}", describe(&identity));
    Ok(())
}

pub async fn logout(state: &AppState) -> AppResult<()> {
    state.sessions.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> AppResult<()> {
    match state.sessions.restore_session().await? {
        ClientState::Active(identity) => println!("{}", describe(&identity)),
        _ => println!("Not signed in"),
    }
    Ok(())
}

fn describe(identity: &Identity) -> String {
    match identity {
        Identity::Admin => "ADMIN".to_string(),
        Identity::Singer(s) => format!("SINGER {} ({})", s.label(), s.public_code),
        Identity::Judge(j) => format!("JUDGE {} ({})", j.display_name, j.public_code),
    }
}
