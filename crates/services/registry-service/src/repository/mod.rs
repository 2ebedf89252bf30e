//! Repository layer for record access.

mod record_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use record_repository::MockRecordRepository;
pub use record_repository::{RecordRepository, RecordStore};
