//! Read-only scans for fleet invariant violations
//!
//! These never fail on a violation; they report what they find so callers can
//! decide how to surface it.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{Drone, DroneId, Matrix, MatrixId};
use crate::ops::FleetRepository;

/// Several drones stored at one cell of a matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionClash {
    pub matrix_id: MatrixId,
    pub x: i64,
    pub y: i64,
    /// Ascending drone ids at the cell
    pub drone_ids: Vec<DroneId>,
}

/// Drones whose stored position lies outside their matrix
///
/// Returns `(matrix_id, drone_id)` pairs ordered by drone id. A drone whose
/// matrix has disappeared is reported as well.
pub fn find_out_of_bounds<R: FleetRepository + ?Sized>(
    repo: &R,
) -> Result<Vec<(MatrixId, DroneId)>> {
    out_of_bounds(repo, repo.drones()?)
}

/// [`find_out_of_bounds`] restricted to one matrix
pub fn find_out_of_bounds_in<R: FleetRepository + ?Sized>(
    repo: &R,
    matrix_id: MatrixId,
) -> Result<Vec<(MatrixId, DroneId)>> {
    out_of_bounds(repo, repo.drones_in_matrix(matrix_id)?)
}

/// Cells holding more than one drone, ordered by matrix then position
pub fn find_position_clashes<R: FleetRepository + ?Sized>(repo: &R) -> Result<Vec<PositionClash>> {
    Ok(clashes(repo.drones()?))
}

/// [`find_position_clashes`] restricted to one matrix
pub fn find_position_clashes_in<R: FleetRepository + ?Sized>(
    repo: &R,
    matrix_id: MatrixId,
) -> Result<Vec<PositionClash>> {
    Ok(clashes(repo.drones_in_matrix(matrix_id)?))
}

fn out_of_bounds<R: FleetRepository + ?Sized>(
    repo: &R,
    drones: Vec<Drone>,
) -> Result<Vec<(MatrixId, DroneId)>> {
    let mut matrices: BTreeMap<MatrixId, Option<Matrix>> = BTreeMap::new();
    let mut found = Vec::new();
    for drone in drones {
        let matrix = match matrices.get(&drone.matrix_id) {
            Some(matrix) => *matrix,
            None => {
                let matrix = repo.matrix(drone.matrix_id)?;
                matrices.insert(drone.matrix_id, matrix);
                matrix
            }
        };
        if matrix.map_or(true, |m| !m.contains(drone.x, drone.y)) {
            found.push((drone.matrix_id, drone.id));
        }
    }
    found.sort_unstable_by_key(|&(_, drone_id)| drone_id);
    Ok(found)
}

fn clashes(drones: Vec<Drone>) -> Vec<PositionClash> {
    let mut cells: BTreeMap<(MatrixId, i64, i64), Vec<DroneId>> = BTreeMap::new();
    for drone in drones {
        cells
            .entry((drone.matrix_id, drone.x, drone.y))
            .or_default()
            .push(drone.id);
    }

    cells
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((matrix_id, x, y), mut drone_ids)| {
            drone_ids.sort_unstable();
            PositionClash {
                matrix_id,
                x,
                y,
                drone_ids,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;
    use crate::ops::Store;

    fn drone(id: DroneId, x: i64, y: i64) -> Drone {
        Drone {
            id,
            name: format!("d{id}"),
            model: format!("m{id}"),
            x,
            y,
            orientation: Orientation::North,
            matrix_id: 1,
        }
    }

    #[test]
    fn test_clean_store_has_no_violations() {
        let mut store = Store::new();
        store.put_matrix(Matrix::new(1, 3, 3));
        store.put_drone(drone(1, 0, 0));
        store.put_drone(drone(2, 3, 3));

        assert!(find_out_of_bounds(&store).unwrap().is_empty());
        assert!(find_position_clashes(&store).unwrap().is_empty());
    }

    #[test]
    fn test_reports_clashes_and_escapes() {
        let mut store = Store::new();
        store.put_matrix(Matrix::new(1, 3, 3));
        store.put_drone(drone(2, 1, 1));
        store.put_drone(drone(1, 1, 1));
        store.put_drone(drone(3, 4, 0));

        assert_eq!(find_out_of_bounds(&store).unwrap(), vec![(1, 3)]);
        assert_eq!(
            find_position_clashes(&store).unwrap(),
            vec![PositionClash {
                matrix_id: 1,
                x: 1,
                y: 1,
                drone_ids: vec![1, 2]
            }]
        );
    }

    #[test]
    fn test_scoped_scans_ignore_other_matrices() {
        let mut store = Store::new();
        store.put_matrix(Matrix::new(1, 3, 3));
        store.put_matrix(Matrix::new(2, 3, 3));
        store.put_drone(drone(1, 0, 0));
        store.put_drone(Drone {
            matrix_id: 2,
            ..drone(2, 2, 2)
        });
        store.put_drone(Drone {
            matrix_id: 2,
            ..drone(3, 2, 2)
        });

        assert!(find_out_of_bounds_in(&store, 1).unwrap().is_empty());
        assert!(find_position_clashes_in(&store, 1).unwrap().is_empty());
        assert_eq!(
            find_position_clashes_in(&store, 2).unwrap(),
            find_position_clashes(&store).unwrap()
        );
    }
}
