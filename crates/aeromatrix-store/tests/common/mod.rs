use rusqlite::Connection;
use tempfile::TempDir;

/// Migrated on-disk database inside a fresh temp dir
///
/// The `TempDir` must outlive the connection.
#[allow(dead_code)]
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let mut conn = Connection::open(dir.path().join("fleet.db")).unwrap();
    aeromatrix_store::migrations::apply_migrations(&mut conn).unwrap();
    (dir, conn)
}
