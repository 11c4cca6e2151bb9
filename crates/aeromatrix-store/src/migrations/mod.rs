//! Migration framework
//!
//! - Embedded SQL migrations
//! - Runner with SHA-256 checksums and idempotent application

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
