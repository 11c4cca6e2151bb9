//! Repository layer bridging the fleet operations to SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteFleetRepo;
