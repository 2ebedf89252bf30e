//! Order workflow - assignment, scoring and judge/singer queries.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{judge_label, EvaluationOrder, Score, SingerRecord};

use super::{update_singer, WriteGate};
use crate::repository::RecordRepository;

/// A pending order paired with the singer it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub order: EvaluationOrder,
    pub singer_id: Uuid,
    pub singer_label: String,
    pub singer_code: String,
    pub singer_online: bool,
}

impl PendingOrder {
    fn new(singer: &SingerRecord, order: &EvaluationOrder) -> Self {
        Self {
            order: order.clone(),
            singer_id: singer.id,
            singer_label: singer.label().to_string(),
            singer_code: singer.public_code.clone(),
            singer_online: singer.is_online,
        }
    }
}

/// An order from a singer's history with its judge resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order: EvaluationOrder,
    pub judge_label: String,
}

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Prepend a pending order to a singer. `judge_id` is required.
    async fn assign_order(
        &self,
        singer_id: Uuid,
        judge_id: Option<Uuid>,
        task_title: Option<String>,
    ) -> AppResult<EvaluationOrder>;

    /// Complete an order with a score parsed from raw input
    async fn record_score(
        &self,
        singer_id: Uuid,
        order_id: Uuid,
        raw_score: &str,
    ) -> AppResult<EvaluationOrder>;

    /// All pending orders assigned to a judge, across every singer
    async fn pending_for_judge(&self, judge_id: Uuid) -> AppResult<Vec<PendingOrder>>;

    /// A singer's orders, newest first, with judge names resolved
    async fn history(&self, singer_id: Uuid) -> AppResult<Vec<OrderView>>;
}

/// Concrete implementation of OrderService using the record repository.
pub struct OrderWorkflow {
    repo: Arc<dyn RecordRepository>,
    gate: WriteGate,
}

impl OrderWorkflow {
    pub fn new(repo: Arc<dyn RecordRepository>, gate: WriteGate) -> Self {
        Self { repo, gate }
    }
}

#[async_trait]
impl OrderService for OrderWorkflow {
    async fn assign_order(
        &self,
        singer_id: Uuid,
        judge_id: Option<Uuid>,
        task_title: Option<String>,
    ) -> AppResult<EvaluationOrder> {
        // The judge is not checked against the roster
        let judge_id = judge_id.ok_or(AppError::NoJudgeSelected)?;
        let order = EvaluationOrder::new(singer_id, judge_id, task_title.as_deref());

        let assigned = update_singer(self.repo.as_ref(), &self.gate, singer_id, |singer| {
            singer.assign(order.clone())?;
            Ok(order)
        })
        .await?;

        tracing::info!(
            %singer_id,
            %judge_id,
            order_id = %assigned.id,
            title = %assigned.task_title,
            "Order assigned"
        );
        Ok(assigned)
    }

    async fn record_score(
        &self,
        singer_id: Uuid,
        order_id: Uuid,
        raw_score: &str,
    ) -> AppResult<EvaluationOrder> {
        let score = Score::parse(raw_score)?;

        let order = update_singer(self.repo.as_ref(), &self.gate, singer_id, |singer| {
            Ok(singer.record_score(order_id, score)?.clone())
        })
        .await?;

        tracing::info!(%singer_id, %order_id, %score, "Order scored");
        Ok(order)
    }

    async fn pending_for_judge(&self, judge_id: Uuid) -> AppResult<Vec<PendingOrder>> {
        let singers = self.repo.load_singers().await?;
        Ok(singers
            .iter()
            .flat_map(|singer| {
                singer
                    .pending_for(judge_id)
                    .map(move |order| PendingOrder::new(singer, order))
            })
            .collect())
    }

    async fn history(&self, singer_id: Uuid) -> AppResult<Vec<OrderView>> {
        let singer = self
            .repo
            .load_singers()
            .await?
            .into_iter()
            .find(|s| s.id == singer_id)
            .ok_or(AppError::NotFound)?;
        let judges = self.repo.load_judges().await?;

        Ok(singer
            .orders
            .into_iter()
            .map(|order| OrderView {
                judge_label: judge_label(&judges, order.assigned_judge_id),
                order,
            })
            .collect())
    }
}
