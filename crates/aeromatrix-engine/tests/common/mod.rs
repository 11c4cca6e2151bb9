use aeromatrix_core::{DroneDraft, FleetPolicy, Orientation};
use aeromatrix_core_types::RequestContext;
use aeromatrix_engine::commands::{drone, matrix};
use rusqlite::Connection;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let conn = aeromatrix_store::db::open_fleet_db(temp_dir.path().join("fleet.db")).unwrap();
    (temp_dir, conn)
}

#[allow(dead_code)]
pub fn ctx() -> RequestContext {
    RequestContext::new().with_actor("test-pilot")
}

/// Create matrix 1 of the given size
#[allow(dead_code)]
pub fn seed_matrix(conn: &mut Connection, max_x: i64, max_y: i64) -> i64 {
    matrix::create_matrix(conn, &ctx(), max_x, max_y).unwrap().id
}

#[allow(dead_code)]
pub fn seed_drone(
    conn: &mut Connection,
    matrix_id: i64,
    name: &str,
    x: i64,
    y: i64,
    orientation: Orientation,
) -> i64 {
    let draft = DroneDraft {
        matrix_id,
        name: name.to_string(),
        model: format!("{name}-model"),
        x,
        y,
        orientation: Some(orientation),
    };
    drone::create_drone(conn, &ctx(), draft, &FleetPolicy::default())
        .unwrap()
        .id
}

/// (x, y, orientation token) as stored
#[allow(dead_code)]
pub fn stored_state(conn: &Connection, drone_id: i64) -> (i64, i64, String) {
    conn.query_row(
        "SELECT x, y, orientation FROM drones WHERE id = ?1",
        [drone_id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .unwrap()
}
