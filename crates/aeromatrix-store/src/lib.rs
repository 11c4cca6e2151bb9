//! AeroMatrix Store - SQLite persistence for the fleet
//!
//! - Connection setup and embedded, checksummed migrations
//! - `SqliteFleetRepo`, the `FleetRepository` implementation over a connection
//! - Hydration of a whole database into the in-memory `Store`

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
pub use repo::SqliteFleetRepo;
