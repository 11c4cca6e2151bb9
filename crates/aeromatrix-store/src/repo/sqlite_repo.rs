//! SQLite implementation of `FleetRepository`
//!
//! The repository borrows a connection; the engine hands it the open
//! transaction (which derefs to `Connection`), so every read and write of
//! one top-level call sees the same snapshot and commits together.

use aeromatrix_core::errors::{FleetError, Result};
use aeromatrix_core::model::{Drone, DroneId, Matrix, MatrixId, NewDrone, Orientation};
use aeromatrix_core::ops::FleetRepository;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::errors::persistence;

const DRONE_COLUMNS: &str = "id, name, model, x, y, orientation, matrix_id";

/// Fleet repository over a borrowed SQLite connection or transaction
pub struct SqliteFleetRepo<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteFleetRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn query_drones<P: Params>(&self, filter: &str, params: P) -> Result<Vec<Drone>> {
        let sql = format!("SELECT {DRONE_COLUMNS} FROM drones {filter} ORDER BY id");
        let mut stmt = self.conn.prepare(&sql).map_err(persistence)?;
        let drones = stmt
            .query_map(params, drone_from_row)
            .map_err(persistence)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(persistence)?;
        Ok(drones)
    }

    fn exists<P: Params>(&self, sql: &str, params: P) -> Result<bool> {
        self.conn
            .query_row(sql, params, |row| row.get(0))
            .map_err(persistence)
    }
}

fn drone_from_row(row: &Row<'_>) -> rusqlite::Result<Drone> {
    let token: String = row.get(5)?;
    let orientation = token
        .parse::<Orientation>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    Ok(Drone {
        id: row.get(0)?,
        name: row.get(1)?,
        model: row.get(2)?,
        x: row.get(3)?,
        y: row.get(4)?,
        orientation,
        matrix_id: row.get(6)?,
    })
}

fn matrix_from_row(row: &Row<'_>) -> rusqlite::Result<Matrix> {
    Ok(Matrix::new(row.get(0)?, row.get(1)?, row.get(2)?))
}

impl FleetRepository for SqliteFleetRepo<'_> {
    fn matrix(&self, id: MatrixId) -> Result<Option<Matrix>> {
        self.conn
            .query_row(
                "SELECT id, max_x, max_y FROM matrices WHERE id = ?1",
                [id],
                matrix_from_row,
            )
            .optional()
            .map_err(persistence)
    }

    fn matrices(&self) -> Result<Vec<Matrix>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, max_x, max_y FROM matrices ORDER BY id")
            .map_err(persistence)?;
        let matrices = stmt
            .query_map([], matrix_from_row)
            .map_err(persistence)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(persistence)?;
        Ok(matrices)
    }

    fn insert_matrix(&mut self, max_x: i64, max_y: i64) -> Result<Matrix> {
        self.conn
            .execute(
                "INSERT INTO matrices (max_x, max_y) VALUES (?1, ?2)",
                params![max_x, max_y],
            )
            .map_err(persistence)?;
        Ok(Matrix::new(self.conn.last_insert_rowid(), max_x, max_y))
    }

    fn save_matrix(&mut self, matrix: &Matrix) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE matrices SET max_x = ?1, max_y = ?2 WHERE id = ?3",
                params![matrix.max_x, matrix.max_y, matrix.id],
            )
            .map_err(persistence)?;
        if updated == 0 {
            return Err(FleetError::MatrixNotFound {
                matrix_id: matrix.id,
            });
        }
        Ok(())
    }

    fn remove_matrix(&mut self, id: MatrixId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM matrices WHERE id = ?1", [id])
            .map_err(persistence)?;
        if removed == 0 {
            return Err(FleetError::MatrixNotFound { matrix_id: id });
        }
        Ok(())
    }

    fn drone(&self, id: DroneId) -> Result<Option<Drone>> {
        self.conn
            .query_row(
                &format!("SELECT {DRONE_COLUMNS} FROM drones WHERE id = ?1"),
                [id],
                drone_from_row,
            )
            .optional()
            .map_err(persistence)
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        self.query_drones("", params![])
    }

    fn drones_in_matrix(&self, matrix_id: MatrixId) -> Result<Vec<Drone>> {
        self.query_drones("WHERE matrix_id = ?1", [matrix_id])
    }

    fn drones_at(&self, x: i64, y: i64, matrix_id: MatrixId) -> Result<Vec<Drone>> {
        self.query_drones(
            "WHERE matrix_id = ?1 AND x = ?2 AND y = ?3",
            params![matrix_id, x, y],
        )
    }

    fn drone_name_taken(&self, name: &str, matrix_id: MatrixId) -> Result<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM drones WHERE name = ?1 AND matrix_id = ?2)",
            params![name, matrix_id],
        )
    }

    fn drone_model_taken(&self, model: &str, matrix_id: MatrixId) -> Result<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM drones WHERE model = ?1 AND matrix_id = ?2)",
            params![model, matrix_id],
        )
    }

    fn insert_drone(&mut self, drone: NewDrone) -> Result<Drone> {
        self.conn
            .execute(
                "INSERT INTO drones (name, model, x, y, orientation, matrix_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    drone.name,
                    drone.model,
                    drone.x,
                    drone.y,
                    drone.orientation.as_token(),
                    drone.matrix_id
                ],
            )
            .map_err(persistence)?;
        Ok(drone.with_id(self.conn.last_insert_rowid()))
    }

    fn save_drone(&mut self, drone: &Drone) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE drones
                 SET name = ?1, model = ?2, x = ?3, y = ?4, orientation = ?5, matrix_id = ?6
                 WHERE id = ?7",
                params![
                    drone.name,
                    drone.model,
                    drone.x,
                    drone.y,
                    drone.orientation.as_token(),
                    drone.matrix_id,
                    drone.id
                ],
            )
            .map_err(persistence)?;
        if updated == 0 {
            return Err(FleetError::DroneNotFound { drone_id: drone.id });
        }
        Ok(())
    }

    fn remove_drone(&mut self, id: DroneId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM drones WHERE id = ?1", [id])
            .map_err(persistence)?;
        if removed == 0 {
            return Err(FleetError::DroneNotFound { drone_id: id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    fn migrated() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn new_drone(name: &str, x: i64, y: i64, matrix_id: MatrixId) -> NewDrone {
        NewDrone {
            name: name.to_string(),
            model: format!("{name}-m"),
            x,
            y,
            orientation: Orientation::West,
            matrix_id,
        }
    }

    #[test]
    fn test_drone_round_trip_keeps_west_token() {
        let conn = migrated();
        let mut repo = SqliteFleetRepo::new(&conn);
        let matrix = repo.insert_matrix(5, 5).unwrap();
        let drone = repo.insert_drone(new_drone("a", 1, 2, matrix.id)).unwrap();

        assert_eq!(repo.drone(drone.id).unwrap(), Some(drone.clone()));
        let stored: String = conn
            .query_row("SELECT orientation FROM drones WHERE id = ?1", [drone.id], |r| r.get(0))
            .unwrap();
        assert_eq!(stored, "O");
    }

    #[test]
    fn test_lookups_by_position_and_labels() {
        let conn = migrated();
        let mut repo = SqliteFleetRepo::new(&conn);
        let m1 = repo.insert_matrix(5, 5).unwrap();
        let m2 = repo.insert_matrix(5, 5).unwrap();
        let a = repo.insert_drone(new_drone("a", 1, 1, m1.id)).unwrap();
        repo.insert_drone(new_drone("b", 1, 1, m2.id)).unwrap();

        assert_eq!(repo.drones_at(1, 1, m1.id).unwrap(), vec![a]);
        assert!(repo.drone_name_taken("a", m1.id).unwrap());
        assert!(!repo.drone_name_taken("a", m2.id).unwrap());
        assert!(repo.drone_model_taken("b-m", m2.id).unwrap());
        assert_eq!(repo.drones().unwrap().len(), 2);
    }

    #[test]
    fn test_save_missing_rows_is_not_found() {
        let conn = migrated();
        let mut repo = SqliteFleetRepo::new(&conn);
        assert_eq!(
            repo.save_matrix(&Matrix::new(9, 1, 1)),
            Err(FleetError::MatrixNotFound { matrix_id: 9 })
        );
        assert_eq!(
            repo.remove_drone(4),
            Err(FleetError::DroneNotFound { drone_id: 4 })
        );
    }

    #[test]
    fn test_corrupt_orientation_is_persistence_error() {
        let conn = migrated();
        let mut repo = SqliteFleetRepo::new(&conn);
        let matrix = repo.insert_matrix(5, 5).unwrap();
        let drone = repo.insert_drone(new_drone("a", 0, 0, matrix.id)).unwrap();
        conn.execute_batch("PRAGMA ignore_check_constraints = ON").unwrap();
        conn.execute("UPDATE drones SET orientation = 'Q' WHERE id = ?1", [drone.id])
            .unwrap();

        let err = repo.drone(drone.id).unwrap_err();
        assert_eq!(err.kind().code(), "persistence");
    }
}
