//! Judge view: pending orders and scoring.

use common::{AppError, AppResult, OptionExt};

use super::require_judge;
use crate::cli::args::OrderAction;
use crate::state::AppState;

pub async fn orders(action: OrderAction, state: &AppState) -> AppResult<()> {
    let judge = require_judge(state).await?;

    match action {
        OrderAction::Pending => {
            let pending = state.orders.pending_for_judge(judge.id).await?;
            if pending.is_empty() {
                println!("No pending orders");
            }
            for p in pending {
                println!(
                    "{}  {:<24} singer={} {} ({}) {}",
                    p.order.id,
                    p.order.task_title,
                    p.singer_id,
                    p.singer_label,
                    p.singer_code,
                    if p.singer_online { "LIVE" } else { "offline" }
                );
            }
        }
        OrderAction::Score {
            singer_id,
            order_id,
            score,
        } => {
            // Judges may only mark orders assigned to them
            let singer = state.identities.get_singer(singer_id).await?;
            let order = singer.order(order_id).ok_or_not_found()?;
            if order.assigned_judge_id != judge.id {
                return Err(AppError::Forbidden);
            }

            let scored = state.orders.record_score(singer_id, order_id, &score).await?;
            println!(
                "\"{}\" marked {}",
                scored.task_title,
                scored.score.map(|s| s.to_string()).unwrap_or_default()
            );
        }
    }
    Ok(())
}
