//! Singer home: profile, presence and score history.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use common::{AppError, AppResult};
use domain::OrderStatus;

use super::require_singer;
use crate::cli::args::MeAction;
use crate::state::AppState;

pub async fn me(action: MeAction, state: &AppState) -> AppResult<()> {
    let singer = require_singer(state).await?;

    match action {
        MeAction::Show => {
            println!("{} ({})", singer.label(), singer.public_code);
            println!(
                "Network:     {}",
                if singer.is_online { "Broadcasting" } else { "Stealth Mode" }
            );
            println!(
                "Latest mark: {}",
                singer
                    .latest_judge_mark
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            if !singer.profile_is_set {
                println!("Profile not set up yet, run `starmaker me profile --name <NAME>`");
            }

            let history = state.orders.history(singer.id).await?;
            if history.is_empty() {
                println!("No evaluation orders yet");
            }
            for view in history {
                let result = match (view.order.status, view.order.score) {
                    (OrderStatus::Completed, Some(score)) => format!("{:>3}/100", score),
                    _ => "pending".to_string(),
                };
                println!(
                    "{}  {:<24} {:<8} assigned {} by {}",
                    view.order.id,
                    view.order.task_title,
                    result,
                    view.order.assigned_at.format("%Y-%m-%d"),
                    view.judge_label
                );
            }
        }
        MeAction::ToggleOnline => {
            let online = state.presence.toggle_online(singer.id).await?;
            println!("{}", if online { "You are live" } else { "You are offline" });
        }
        MeAction::Profile { name, avatar } => {
            let avatar = match avatar {
                Some(path) => Some(encode_avatar(&path).await?),
                None => None,
            };
            let updated = state
                .identities
                .update_profile(singer.id, name, avatar)
                .await?;
            println!("Profile saved for {}", updated.label());
        }
    }
    Ok(())
}

/// Read an image file into a `data:` URI.
async fn encode_avatar(path: &Path) -> AppResult<String> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => {
            return Err(AppError::validation(format!(
                "{} is not a png, jpeg, gif or webp image",
                path.display()
            )))
        }
    };

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::validation(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
