//! Judge score value object.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, MIN_SCORE};
use crate::error::{DomainError, DomainResult};

/// A judge score, always within `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Parse raw user input as a score.
    ///
    /// Leading and trailing whitespace is ignored; anything else that is not a
    /// plain integer is rejected. Decimals such as "87.9" are refused rather
    /// than truncated.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid_score(format!("'{}' is not a number", raw.trim())))?;
        Self::try_from(value)
    }

    /// Numeric value of the score
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(DomainError::invalid_score(format!(
                "{} is outside {}..={}",
                value, MIN_SCORE, MAX_SCORE
            )));
        }
        Ok(Score(value as u8))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
