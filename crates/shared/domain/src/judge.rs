//! Judge domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{JUDGE_NAME_PREFIX, UNKNOWN_JUDGE_LABEL};

/// Judge account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeRecord {
    pub id: Uuid,
    /// Admin-assigned login code, e.g. "JDG-1234"
    #[serde(rename = "judgeId")]
    pub public_code: String,
    pub password: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl JudgeRecord {
    /// Create a judge named after its position in the roster ("Specialist N")
    pub fn new(public_code: String, password: String, ordinal: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            public_code,
            password,
            display_name: format!("{} {}", JUDGE_NAME_PREFIX, ordinal),
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
}

/// Resolve a judge's display name, degrading to a fallback label when the
/// judge has been deleted.
pub fn judge_label(judges: &[JudgeRecord], judge_id: Uuid) -> String {
    judges
        .iter()
        .find(|j| j.id == judge_id)
        .map(|j| j.display_name.clone())
        .unwrap_or_else(|| UNKNOWN_JUDGE_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_uses_ordinal() {
        let judge = JudgeRecord::new("JDG-1000".to_string(), "1234".to_string(), 3);
        assert_eq!(judge.display_name, "Specialist 3");
    }

    #[test]
    fn test_label_falls_back_for_missing_judge() {
        let judge = JudgeRecord::new("JDG-1000".to_string(), "1234".to_string(), 1);
        let judges = vec![judge.clone()];
        assert_eq!(judge_label(&judges, judge.id), "Specialist 1");
        assert_eq!(judge_label(&judges, Uuid::new_v4()), UNKNOWN_JUDGE_LABEL);
    }
}
