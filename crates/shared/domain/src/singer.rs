//! Singer domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::order::EvaluationOrder;
use crate::score::Score;

/// Result of an automated profile review.
///
/// Carried on the record for data compatibility; the registry never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReview {
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub tone_analysis: String,
}

/// Singer (artist) account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingerRecord {
    pub id: Uuid,
    #[serde(rename = "singerName", default)]
    pub display_name: String,
    /// Admin-assigned login code, e.g. "SM-4821"
    #[serde(rename = "singerId")]
    pub public_code: String,
    pub password: String,
    /// Encoded avatar image (data URI)
    #[serde(
        rename = "dp",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(rename = "submittedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isProfileSet", default)]
    pub profile_is_set: bool,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_banned: bool,
    /// Newest first
    #[serde(default)]
    pub orders: Vec<EvaluationOrder>,
    /// Score of whichever order was marked most recently
    #[serde(rename = "judgeMark", default, skip_serializing_if = "Option::is_none")]
    pub latest_judge_mark: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_review: Option<AiReview>,
}

impl SingerRecord {
    /// Create a blank account with the given login credentials
    pub fn new(public_code: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: String::new(),
            public_code,
            password,
            avatar: None,
            created_at: Utc::now(),
            profile_is_set: false,
            is_online: false,
            is_banned: false,
            orders: Vec::new(),
            latest_judge_mark: None,
            ai_review: None,
        }
    }

    /// Check whether login credentials match exactly
    pub fn matches(&self, public_code: &str, password: &str) -> bool {
        self.public_code == public_code && self.password == password
    }

    /// Overwrite the admin-editable fields
    pub fn update_credentials(&mut self, display_name: String, public_code: String, password: String) {
        self.display_name = display_name;
        self.public_code = public_code;
        self.password = password;
    }

    /// Singer self-service profile setup
    pub fn set_profile(&mut self, display_name: String, avatar: Option<String>) {
        self.display_name = display_name;
        if avatar.is_some() {
            self.avatar = avatar;
        }
        self.profile_is_set = true;
    }

    /// Flip the online flag, returning the new value
    pub fn toggle_online(&mut self) -> bool {
        self.is_online = !self.is_online;
        self.is_online
    }

    pub fn set_banned(&mut self, banned: bool) {
        self.is_banned = banned;
    }

    /// Prepend a new order. The order must belong to this singer.
    pub fn assign(&mut self, order: EvaluationOrder) -> DomainResult<()> {
        if order.singer_id != self.id {
            return Err(DomainError::validation(format!(
                "order {} belongs to singer {}, not {}",
                order.id, order.singer_id, self.id
            )));
        }
        self.orders.insert(0, order);
        Ok(())
    }

    pub fn order(&self, order_id: Uuid) -> Option<&EvaluationOrder> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Complete one order and overwrite the singer's latest mark with its score
    pub fn record_score(&mut self, order_id: Uuid, score: Score) -> DomainResult<&EvaluationOrder> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| DomainError::not_found("Order"))?;

        order.complete(score)?;
        self.latest_judge_mark = Some(score);

        self.order(order_id)
            .ok_or_else(|| DomainError::internal("scored order vanished"))
    }

    /// Orders waiting on the given judge
    pub fn pending_for(&self, judge_id: Uuid) -> impl Iterator<Item = &EvaluationOrder> {
        self.orders.iter().filter(move |o| o.is_pending_for(judge_id))
    }

    /// Name to show, falling back to the login code before profile setup
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.public_code
        } else {
            &self.display_name
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;

    fn singer() -> SingerRecord {
        SingerRecord::new("SM-4821".to_string(), "7734".to_string())
    }

    #[test]
    fn test_new_singer_defaults() {
        let s = singer();
        assert!(s.display_name.is_empty());
        assert!(s.avatar.is_none());
        assert!(!s.profile_is_set);
        assert!(!s.is_online);
        assert!(!s.is_banned);
        assert!(s.orders.is_empty());
        assert!(s.latest_judge_mark.is_none());
    }

    #[test]
    fn test_toggle_online_twice_restores() {
        let mut s = singer();
        assert!(s.toggle_online());
        assert!(!s.toggle_online());
        assert!(!s.is_online);
    }

    #[test]
    fn test_assign_prepends() {
        let mut s = singer();
        let judge = Uuid::new_v4();
        let first = EvaluationOrder::new(s.id, judge, Some("First"));
        let second = EvaluationOrder::new(s.id, judge, Some("Second"));
        s.assign(first).unwrap();
        s.assign(second).unwrap();
        assert_eq!(s.orders[0].task_title, "Second");
        assert_eq!(s.orders[1].task_title, "First");
    }

    #[test]
    fn test_assign_rejects_foreign_order() {
        let mut s = singer();
        let order = EvaluationOrder::new(Uuid::new_v4(), Uuid::new_v4(), None);
        assert!(matches!(s.assign(order), Err(DomainError::Validation(_))));
        assert!(s.orders.is_empty());
    }

    #[test]
    fn test_record_score_overwrites_latest_mark() {
        let mut s = singer();
        let judge = Uuid::new_v4();
        let a = EvaluationOrder::new(s.id, judge, Some("A"));
        let b = EvaluationOrder::new(s.id, judge, Some("B"));
        let (a_id, b_id) = (a.id, b.id);
        s.assign(a).unwrap();
        s.assign(b).unwrap();

        s.record_score(a_id, Score::try_from(90).unwrap()).unwrap();
        s.record_score(b_id, Score::try_from(40).unwrap()).unwrap();

        // Latest, not highest
        assert_eq!(s.latest_judge_mark.map(Score::value), Some(40));
        assert_eq!(s.order(a_id).unwrap().status, OrderStatus::Completed);
    }

    #[test]
    fn test_record_score_leaves_other_orders_pending() {
        let mut s = singer();
        let judge = Uuid::new_v4();
        let kept = EvaluationOrder::new(s.id, judge, Some("Kept"));
        let scored = EvaluationOrder::new(s.id, judge, Some("Scored"));
        let (kept_id, scored_id) = (kept.id, scored.id);
        let before = kept.clone();
        s.assign(kept).unwrap();
        s.assign(scored).unwrap();

        s.record_score(scored_id, Score::try_from(75).unwrap()).unwrap();

        let other = s.order(kept_id).unwrap();
        assert_eq!(other.status, OrderStatus::Pending);
        assert!(other.score.is_none());
        assert_eq!(*other, before);
    }

    #[test]
    fn test_record_score_unknown_order() {
        let mut s = singer();
        let result = s.record_score(Uuid::new_v4(), Score::try_from(50).unwrap());
        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert!(s.latest_judge_mark.is_none());
    }

    #[test]
    fn test_reads_legacy_blob() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "singerName": "",
            "singerId": "SM-1111",
            "password": "2222",
            "dp": "",
            "submittedAt": "2024-05-01T10:00:00.000Z",
            "isProfileSet": false
        });
        let s: SingerRecord = serde_json::from_value(json).unwrap();
        assert!(s.avatar.is_none());
        assert!(!s.is_online);
        assert!(!s.is_banned);
        assert!(s.orders.is_empty());
    }
}
