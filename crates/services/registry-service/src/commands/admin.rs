//! Admin records screen: singer and judge provisioning, order assignment.

use common::AppResult;
use domain::IdentityKind;

use super::{confirm, require_admin};
use crate::cli::args::{EditArgs, JudgeAction, SingerAction};
use crate::service::{IdentityEdit, IssuedCredentials};
use crate::state::AppState;

pub async fn singers(action: SingerAction, state: &AppState) -> AppResult<()> {
    require_admin(state).await?;

    match action {
        SingerAction::List => {
            let singers = state.identities.list_singers().await?;
            if singers.is_empty() {
                println!("No singers yet");
            }
            for s in singers {
                let status = match (s.is_banned, s.is_online) {
                    (true, _) => "SUSPENDED",
                    (false, true) => "LIVE",
                    (false, false) => "offline",
                };
                let mark = s
                    .latest_judge_mark
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {:<10} {:<20} pass={:<8} {:<9} mark={:<3} orders={}",
                    s.id,
                    s.public_code,
                    s.label(),
                    s.password,
                    status,
                    mark,
                    s.orders.len()
                );
            }
        }
        SingerAction::Create => {
            let issued = state.identities.create_singer().await?;
            print_issued("Singer", &issued);
        }
        SingerAction::Edit(args) => {
            let id = args.id;
            state
                .identities
                .edit_identity(IdentityKind::Singer, id, edit_from(args))
                .await?;
            println!("Singer {} updated", id);
        }
        SingerAction::Delete(args) => {
            if !confirm("Delete this artist? All profile data is erased permanently", args.yes)? {
                println!("Cancelled");
                return Ok(());
            }
            state.identities.delete_singer(args.id).await?;
            println!("Singer {} deleted", args.id);
        }
        SingerAction::Ban { id } => {
            let singer = state.identities.set_banned(id, true).await?;
            println!("{} suspended", singer.public_code);
        }
        SingerAction::Unban { id } => {
            let singer = state.identities.set_banned(id, false).await?;
            println!("{} reinstated", singer.public_code);
        }
        SingerAction::Assign {
            singer_id,
            judge,
            title,
        } => {
            let order = state.orders.assign_order(singer_id, judge, title).await?;
            println!("Order {} \"{}\" assigned", order.id, order.task_title);
        }
    }
    Ok(())
}

pub async fn judges(action: JudgeAction, state: &AppState) -> AppResult<()> {
    require_admin(state).await?;

    match action {
        JudgeAction::List => {
            let judges = state.identities.list_judges().await?;
            if judges.is_empty() {
                println!("No judges yet");
            }
            for j in judges {
                println!(
                    "{}  {:<10} {:<20} pass={}",
                    j.id, j.public_code, j.display_name, j.password
                );
            }
        }
        JudgeAction::Create => {
            let issued = state.identities.create_judge().await?;
            print_issued("Judge", &issued);
        }
        JudgeAction::Edit(args) => {
            let id = args.id;
            state
                .identities
                .edit_identity(IdentityKind::Judge, id, edit_from(args))
                .await?;
            println!("Judge {} updated", id);
        }
        JudgeAction::Delete(args) => {
            if !confirm("Erase this judge's access?", args.yes)? {
                println!("Cancelled");
                return Ok(());
            }
            state.identities.delete_judge(args.id).await?;
            println!("Judge {} deleted", args.id);
        }
    }
    Ok(())
}

fn edit_from(args: EditArgs) -> IdentityEdit {
    IdentityEdit {
        display_name: args.name,
        public_code: args.code,
        password: args.password,
    }
}

fn print_issued(kind: &str, issued: &IssuedCredentials) {
    println!("{} created", kind);
    println!("  id:       {}", issued.id);
    println!("  login:    {}", issued.public_code);
    println!("  passkey:  {}", issued.password);
}
