//! CLI module - Command-line interface for the registry.
//!
//! Subcommands map onto the role screens:
//! - `login` / `logout` / `whoami` - session
//! - `singers` / `judges` - admin records
//! - `orders` - judge view
//! - `me` - singer home

pub mod args;

pub use args::{Cli, Commands};
