//! AeroMatrix Engine - orchestration layer
//!
//! Runs the core fleet operations against SQLite. Each top-level call is one
//! `IMMEDIATE` transaction (one per drone for in-sequence flights) and owns
//! its start/end/error logging.

pub mod commands;

pub use aeromatrix_store::Result;
pub use commands::engine_command::{apply_engine_command, EngineCommand};
