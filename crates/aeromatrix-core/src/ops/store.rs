use std::collections::BTreeMap;

use crate::errors::{FleetError, Result};
use crate::model::{Drone, DroneId, Matrix, MatrixId, NewDrone};

use super::repository::FleetRepository;

/// In-memory fleet state
///
/// BTreeMap-backed so that listings come out in id order, matching the
/// SQLite repository. Not thread-safe; callers serialize access (the
/// functional `apply()` boundary takes the store by value).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub(crate) matrices: BTreeMap<MatrixId, Matrix>,
    pub(crate) drones: BTreeMap<DroneId, Drone>,
    next_matrix_id: MatrixId,
    next_drone_id: DroneId,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a matrix with a caller-chosen id (hydration and test setup)
    pub fn put_matrix(&mut self, matrix: Matrix) {
        self.next_matrix_id = self.next_matrix_id.max(matrix.id);
        self.matrices.insert(matrix.id, matrix);
    }

    /// Insert a drone with a caller-chosen id, bypassing validation (hydration and test setup)
    pub fn put_drone(&mut self, drone: Drone) {
        self.next_drone_id = self.next_drone_id.max(drone.id);
        self.drones.insert(drone.id, drone);
    }

    pub fn matrix_count(&self) -> usize {
        self.matrices.len()
    }

    pub fn drone_count(&self) -> usize {
        self.drones.len()
    }
}

impl FleetRepository for Store {
    fn matrix(&self, id: MatrixId) -> Result<Option<Matrix>> {
        Ok(self.matrices.get(&id).copied())
    }

    fn matrices(&self) -> Result<Vec<Matrix>> {
        Ok(self.matrices.values().copied().collect())
    }

    fn insert_matrix(&mut self, max_x: i64, max_y: i64) -> Result<Matrix> {
        self.next_matrix_id += 1;
        let matrix = Matrix::new(self.next_matrix_id, max_x, max_y);
        self.matrices.insert(matrix.id, matrix);
        Ok(matrix)
    }

    fn save_matrix(&mut self, matrix: &Matrix) -> Result<()> {
        let slot = self
            .matrices
            .get_mut(&matrix.id)
            .ok_or(FleetError::MatrixNotFound {
                matrix_id: matrix.id,
            })?;
        *slot = *matrix;
        Ok(())
    }

    fn remove_matrix(&mut self, id: MatrixId) -> Result<()> {
        self.matrices
            .remove(&id)
            .map(|_| ())
            .ok_or(FleetError::MatrixNotFound { matrix_id: id })
    }

    fn drone(&self, id: DroneId) -> Result<Option<Drone>> {
        Ok(self.drones.get(&id).cloned())
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        Ok(self.drones.values().cloned().collect())
    }

    fn drones_in_matrix(&self, matrix_id: MatrixId) -> Result<Vec<Drone>> {
        Ok(self
            .drones
            .values()
            .filter(|d| d.matrix_id == matrix_id)
            .cloned()
            .collect())
    }

    fn drones_at(&self, x: i64, y: i64, matrix_id: MatrixId) -> Result<Vec<Drone>> {
        Ok(self
            .drones
            .values()
            .filter(|d| d.matrix_id == matrix_id && d.x == x && d.y == y)
            .cloned()
            .collect())
    }

    fn drone_name_taken(&self, name: &str, matrix_id: MatrixId) -> Result<bool> {
        Ok(self
            .drones
            .values()
            .any(|d| d.matrix_id == matrix_id && d.name == name))
    }

    fn drone_model_taken(&self, model: &str, matrix_id: MatrixId) -> Result<bool> {
        Ok(self
            .drones
            .values()
            .any(|d| d.matrix_id == matrix_id && d.model == model))
    }

    fn insert_drone(&mut self, drone: NewDrone) -> Result<Drone> {
        self.next_drone_id += 1;
        let drone = drone.with_id(self.next_drone_id);
        self.drones.insert(drone.id, drone.clone());
        Ok(drone)
    }

    fn save_drone(&mut self, drone: &Drone) -> Result<()> {
        let slot = self
            .drones
            .get_mut(&drone.id)
            .ok_or(FleetError::DroneNotFound { drone_id: drone.id })?;
        *slot = drone.clone();
        Ok(())
    }

    fn remove_drone(&mut self, id: DroneId) -> Result<()> {
        self.drones
            .remove(&id)
            .map(|_| ())
            .ok_or(FleetError::DroneNotFound { drone_id: id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;

    fn new_drone(name: &str, x: i64, y: i64, matrix_id: MatrixId) -> NewDrone {
        NewDrone {
            name: name.to_string(),
            model: format!("{name}-model"),
            x,
            y,
            orientation: Orientation::North,
            matrix_id,
        }
    }

    #[test]
    fn test_new_store() {
        let store = Store::new();
        assert_eq!(store.matrix_count(), 0);
        assert_eq!(store.drone_count(), 0);
    }

    #[test]
    fn test_ids_are_assigned_sequentially() {
        let mut store = Store::new();
        let m1 = store.insert_matrix(4, 4).unwrap();
        let m2 = store.insert_matrix(2, 2).unwrap();
        assert_eq!((m1.id, m2.id), (1, 2));

        let d = store.insert_drone(new_drone("alpha", 0, 0, m1.id)).unwrap();
        assert_eq!(d.id, 1);
    }

    #[test]
    fn test_put_keeps_id_counter_ahead() {
        let mut store = Store::new();
        store.put_matrix(Matrix::new(10, 4, 4));
        let next = store.insert_matrix(1, 1).unwrap();
        assert_eq!(next.id, 11);
    }

    #[test]
    fn test_lookups_are_scoped_to_matrix() {
        let mut store = Store::new();
        let m1 = store.insert_matrix(4, 4).unwrap();
        let m2 = store.insert_matrix(4, 4).unwrap();
        store.insert_drone(new_drone("alpha", 1, 1, m1.id)).unwrap();

        assert!(store.drone_name_taken("alpha", m1.id).unwrap());
        assert!(!store.drone_name_taken("alpha", m2.id).unwrap());
        assert!(store.drone_model_taken("alpha-model", m1.id).unwrap());
        assert_eq!(store.drones_at(1, 1, m1.id).unwrap().len(), 1);
        assert!(store.drones_at(1, 1, m2.id).unwrap().is_empty());
    }

    #[test]
    fn test_save_missing_drone_fails() {
        let mut store = Store::new();
        let ghost = new_drone("ghost", 0, 0, 1).with_id(99);
        assert_eq!(
            store.save_drone(&ghost),
            Err(FleetError::DroneNotFound { drone_id: 99 })
        );
    }
}
