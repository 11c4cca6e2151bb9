//! Hydration - load a whole fleet database into the in-memory `Store`

use aeromatrix_core::ops::{FleetRepository, Store};
use rusqlite::Connection;

use crate::repo::SqliteFleetRepo;
use crate::Result;

/// Load every matrix and drone, keeping their row ids
///
/// Later inserts into the returned store continue after the highest loaded id.
pub fn load_store(conn: &Connection) -> Result<Store> {
    let repo = SqliteFleetRepo::new(conn);
    let mut store = Store::new();

    for matrix in repo.matrices()? {
        store.put_matrix(matrix);
    }
    for drone in repo.drones()? {
        store.put_drone(drone);
    }

    tracing::debug!(
        matrices = store.matrix_count(),
        drones = store.drone_count(),
        "fleet hydrated"
    );
    Ok(store)
}
