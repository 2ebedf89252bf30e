//! Domain layer - audition records and their business rules.
//!
//! This crate contains pure domain logic with no storage dependencies:
//! singer and judge accounts, evaluation orders, scores, and the client
//! session state machine.

pub mod constants;
pub mod error;
pub mod judge;
pub mod order;
pub mod score;
pub mod session;
pub mod singer;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use judge::{judge_label, JudgeRecord};
pub use order::{EvaluationOrder, OrderStatus};
pub use score::Score;
pub use session::{ClientState, Identity, IdentityKind, Role, Session};
pub use singer::{AiReview, SingerRecord};
