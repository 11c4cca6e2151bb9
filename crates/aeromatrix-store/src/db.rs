//! Database connection management

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Enable foreign keys and WAL journaling
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)
}

/// Open (creating parent directories as needed), configure and migrate a fleet database
pub fn open_fleet_db<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    let mut conn = open(path)?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    tracing::debug!(path = %path.display(), "fleet database ready");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_fleet_db_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fleet.db");

        let conn = open_fleet_db(&path).unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
        assert!(path.exists());
    }
}
