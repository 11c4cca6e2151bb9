//! Lookup and persistence interface required by the fleet operations
//!
//! Every operation in `drone_ops`, `matrix_ops` and `flight_ops` is generic
//! over this trait, so the same validation and execution code runs against
//! the in-memory [`Store`](super::Store) and against a SQLite transaction.
//!
//! Implementations are not expected to enforce fleet invariants themselves;
//! the operations validate before they write.

use crate::errors::{FleetError, Result};
use crate::model::{Drone, DroneId, Matrix, MatrixId, NewDrone};

pub trait FleetRepository {
    // ----- matrices -----

    fn matrix(&self, id: MatrixId) -> Result<Option<Matrix>>;

    /// All matrices, ordered by id
    fn matrices(&self) -> Result<Vec<Matrix>>;

    /// Insert a matrix and return it with its assigned id
    fn insert_matrix(&mut self, max_x: i64, max_y: i64) -> Result<Matrix>;

    fn save_matrix(&mut self, matrix: &Matrix) -> Result<()>;

    fn remove_matrix(&mut self, id: MatrixId) -> Result<()>;

    // ----- drones -----

    fn drone(&self, id: DroneId) -> Result<Option<Drone>>;

    /// All drones, ordered by id
    fn drones(&self) -> Result<Vec<Drone>>;

    /// Drones owned by a matrix, ordered by id
    fn drones_in_matrix(&self, matrix_id: MatrixId) -> Result<Vec<Drone>>;

    /// Drones stored at exactly `(x, y)` in a matrix
    fn drones_at(&self, x: i64, y: i64, matrix_id: MatrixId) -> Result<Vec<Drone>>;

    fn drone_name_taken(&self, name: &str, matrix_id: MatrixId) -> Result<bool>;

    fn drone_model_taken(&self, model: &str, matrix_id: MatrixId) -> Result<bool>;

    /// Insert a drone and return it with its assigned id
    fn insert_drone(&mut self, drone: NewDrone) -> Result<Drone>;

    /// Overwrite every attribute of an existing drone
    fn save_drone(&mut self, drone: &Drone) -> Result<()>;

    fn remove_drone(&mut self, id: DroneId) -> Result<()>;
}

/// Resolve a matrix or fail with `MatrixNotFound`
pub fn require_matrix<R: FleetRepository + ?Sized>(repo: &R, id: MatrixId) -> Result<Matrix> {
    repo.matrix(id)?
        .ok_or(FleetError::MatrixNotFound { matrix_id: id })
}

/// Resolve a drone or fail with `DroneNotFound`
pub fn require_drone<R: FleetRepository + ?Sized>(repo: &R, id: DroneId) -> Result<Drone> {
    repo.drone(id)?
        .ok_or(FleetError::DroneNotFound { drone_id: id })
}
