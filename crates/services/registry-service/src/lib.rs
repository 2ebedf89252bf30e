//! StarMaker registry - audition records for singers, judges and admins
//!
//! Everything lives in one key-value store: the singer list (with each
//! singer's evaluation orders embedded), the judge roster and the current
//! session.
//!
//! # Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations, gated by role
//! - **config**: Registry configuration from the environment
//! - **infra**: Key-value store backends (file, memory, redis)
//! - **repository**: Typed access to the persisted JSON documents
//! - **service**: Identity, order, presence and session logic
//!
//! # CLI Usage
//!
//! ```bash
//! starmaker login admin
//! starmaker singers create
//! starmaker login singer --id SM-4821
//! starmaker me show
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod state;

// Re-export commonly used types at crate root
pub use config::RegistryConfig;
pub use infra::{FileStore, KeyValueStore, MemoryStore};
pub use state::AppState;
