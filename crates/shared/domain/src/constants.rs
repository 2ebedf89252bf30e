//! Domain-level constants.
//!
//! These constants define business rules for accounts and evaluation orders.

// =============================================================================
// Credentials
// =============================================================================

/// Public code prefix for singer accounts (e.g. "SM-4821")
pub const SINGER_CODE_PREFIX: &str = "SM";

/// Public code prefix for judge accounts (e.g. "JDG-1234")
pub const JUDGE_CODE_PREFIX: &str = "JDG";

/// Smallest generated credential number (always four digits)
pub const CREDENTIAL_MIN: u16 = 1000;

/// Largest generated credential number
pub const CREDENTIAL_MAX: u16 = 9999;

/// Attempts made to find an unused public code before giving up
pub const MAX_CODE_ATTEMPTS: usize = 64;

/// Build a public login code from a prefix and a generated number
pub fn public_code(prefix: &str, number: u16) -> String {
    format!("{}-{}", prefix, number)
}

// =============================================================================
// Judges
// =============================================================================

/// Display name prefix for freshly minted judges ("Specialist 3")
pub const JUDGE_NAME_PREFIX: &str = "Specialist";

/// Label shown for an order whose judge no longer exists
pub const UNKNOWN_JUDGE_LABEL: &str = "Auditor";

// =============================================================================
// Orders
// =============================================================================

/// Task title used when an order is assigned without one
pub const DEFAULT_TASK_TITLE: &str = "Standard Performance";

/// Lowest accepted judge score
pub const MIN_SCORE: i64 = 0;

/// Highest accepted judge score
pub const MAX_SCORE: i64 = 100;
