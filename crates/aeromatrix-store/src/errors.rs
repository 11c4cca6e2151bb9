//! Error helpers for aeromatrix-store
//!
//! Store-level entry points return the canonical `ExError`; the repository
//! returns `FleetError` because it sits underneath the core operations.

use aeromatrix_core::errors::{ExError, ExErrorKind, FleetError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// The recorded checksum of an applied migration no longer matches the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a SQLite failure inside the repository
pub fn persistence(err: rusqlite::Error) -> FleetError {
    FleetError::Persistence {
        message: err.to_string(),
    }
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
