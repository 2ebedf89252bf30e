//! Evaluation order entity.
//!
//! An order is one performance-review task scoped to a single singer and a
//! single judge. It moves from `Pending` to `Completed` exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_TASK_TITLE;
use crate::error::{DomainError, DomainResult};
use crate::score::Score;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Evaluation order embedded in its singer's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOrder")]
pub struct EvaluationOrder {
    pub id: Uuid,
    /// Owning singer (back-reference)
    pub singer_id: Uuid,
    /// Judge expected to score this order; may dangle after judge deletion
    pub assigned_judge_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub status: OrderStatus,
    /// Present iff `status == Completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    pub task_title: String,
}

impl EvaluationOrder {
    /// Create a pending order stamped with the current time.
    ///
    /// A missing or blank title falls back to `DEFAULT_TASK_TITLE`.
    pub fn new(singer_id: Uuid, assigned_judge_id: Uuid, task_title: Option<&str>) -> Self {
        let task_title = task_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TASK_TITLE)
            .to_string();

        Self {
            id: Uuid::new_v4(),
            singer_id,
            assigned_judge_id,
            assigned_at: Utc::now(),
            status: OrderStatus::Pending,
            score: None,
            task_title,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Whether this order waits on the given judge
    pub fn is_pending_for(&self, judge_id: Uuid) -> bool {
        self.is_pending() && self.assigned_judge_id == judge_id
    }

    /// Mark the order completed with a score. There is no way back.
    pub fn complete(&mut self, score: Score) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::OrderCompleted);
        }
        self.status = OrderStatus::Completed;
        self.score = Some(score);
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrder {
    id: Uuid,
    singer_id: Uuid,
    assigned_judge_id: Uuid,
    assigned_at: DateTime<Utc>,
    status: OrderStatus,
    #[serde(default)]
    score: Option<Score>,
    #[serde(default)]
    task_title: Option<String>,
}

impl TryFrom<RawOrder> for EvaluationOrder {
    type Error = DomainError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        match (raw.status, raw.score) {
            (OrderStatus::Pending, Some(_)) => {
                return Err(DomainError::validation(format!(
                    "pending order {} carries a score",
                    raw.id
                )))
            }
            (OrderStatus::Completed, None) => {
                return Err(DomainError::validation(format!(
                    "completed order {} has no score",
                    raw.id
                )))
            }
            _ => {}
        }

        Ok(Self {
            id: raw.id,
            singer_id: raw.singer_id,
            assigned_judge_id: raw.assigned_judge_id,
            assigned_at: raw.assigned_at,
            status: raw.status,
            score: raw.score,
            task_title: raw.task_title.unwrap_or_else(|| DEFAULT_TASK_TITLE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_pending_without_score() {
        let order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), Some("Ballad Round"));
        assert!(order.is_pending());
        assert_eq!(order.score, None);
        assert_eq!(order.task_title, "Ballad Round");
    }

    #[test]
    fn test_blank_title_uses_default() {
        let order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), Some("   "));
        assert_eq!(order.task_title, DEFAULT_TASK_TITLE);

        let order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), None);
        assert_eq!(order.task_title, DEFAULT_TASK_TITLE);
    }

    #[test]
    fn test_complete_is_one_way() {
        let mut order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), None);
        order.complete(Score::try_from(70).unwrap()).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.score.map(Score::value), Some(70));

        let again = order.complete(Score::try_from(10).unwrap());
        assert_eq!(again, Err(DomainError::OrderCompleted));
        assert_eq!(order.score.map(Score::value), Some(70));
    }

    #[test]
    fn test_wire_format_uses_legacy_field_names() {
        let mut order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), None);
        order.complete(Score::try_from(87).unwrap()).unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["score"], 87);
        assert!(json.get("assignedJudgeId").is_some());
        assert!(json.get("taskTitle").is_some());

        let back: EvaluationOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_deserialize_rejects_score_on_pending() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "singerId": Uuid::new_v4(),
            "assignedJudgeId": Uuid::new_v4(),
            "assignedAt": "2024-05-01T10:00:00Z",
            "status": "PENDING",
            "score": 50,
            "taskTitle": "Warmup"
        });
        assert!(serde_json::from_value::<EvaluationOrder>(json).is_err());
    }
}
