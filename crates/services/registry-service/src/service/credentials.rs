//! Credential generation for new accounts.

use std::collections::HashSet;

use rand::Rng;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{public_code, CREDENTIAL_MAX, CREDENTIAL_MIN, MAX_CODE_ATTEMPTS};

/// Source of four-digit credential numbers.
pub trait CredentialGenerator: Send + Sync {
    /// Next number in `CREDENTIAL_MIN..=CREDENTIAL_MAX`
    fn next_number(&self) -> u16;
}

/// Thread-local RNG generator used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCredentials;

impl CredentialGenerator for RandomCredentials {
    fn next_number(&self) -> u16 {
        rand::thread_rng().gen_range(CREDENTIAL_MIN..=CREDENTIAL_MAX)
    }
}

/// Credentials handed back once, at account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    pub id: Uuid,
    pub public_code: String,
    pub password: String,
}

/// Draw a public code not present in `taken`, plus a password.
///
/// Gives up with `Conflict` after `MAX_CODE_ATTEMPTS` collisions.
pub fn issue(
    generator: &dyn CredentialGenerator,
    prefix: &str,
    taken: &HashSet<&str>,
) -> AppResult<(String, String)> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = public_code(prefix, generator.next_number());
        if taken.contains(code.as_str()) {
            tracing::debug!(%code, "Generated code collides, retrying");
            continue;
        }
        let password = generator.next_number().to_string();
        return Ok((code, password));
    }

    Err(AppError::conflict(format!("Every drawn {} code", prefix)))
}


#[cfg(test)]
mod tests {
    use super::testing::FixedCredentials;
    use super::*;

    #[test]
    fn test_random_numbers_are_four_digits() {
        let generator = RandomCredentials;
        for _ in 0..200 {
            let n = generator.next_number();
            assert!((CREDENTIAL_MIN..=CREDENTIAL_MAX).contains(&n));
        }
    }

    #[test]
    fn test_issue_formats_code_and_password() {
        let generator = FixedCredentials::new(&[4821, 7734]);
        let (code, password) = issue(&generator, "SM", &HashSet::new()).unwrap();
        assert_eq!(code, "SM-4821");
        assert_eq!(password, "7734");
    }

    #[test]
    fn test_issue_retries_on_collision() {
        let generator = FixedCredentials::new(&[4821, 4821, 5000, 1111]);
        let taken: HashSet<&str> = ["SM-4821"].into_iter().collect();
        let (code, password) = issue(&generator, "SM", &taken).unwrap();
        assert_eq!(code, "SM-5000");
        assert_eq!(password, "1111");
    }

    #[test]
    fn test_issue_gives_up_eventually() {
        let generator = FixedCredentials::new(&[4821; MAX_CODE_ATTEMPTS]);
        let taken: HashSet<&str> = ["SM-4821"].into_iter().collect();
        assert!(matches!(
            issue(&generator, "SM", &taken),
            Err(AppError::Conflict(_))
        ));
    }
}
