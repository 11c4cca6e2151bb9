//! Matrix lifecycle operations
//!
//! Every function validates fully before it writes, so a failed call leaves
//! the repository untouched.

use crate::errors::{FleetError, Result};
use crate::model::{Matrix, MatrixId};
use crate::policy::FleetPolicy;
use crate::rules::validation;

use super::repository::{require_matrix, FleetRepository};

/// Create a matrix with inclusive upper bounds `max_x` and `max_y`
///
/// # Errors
/// `InvalidDimensions` if either dimension is not positive.
pub fn create_matrix<R: FleetRepository + ?Sized>(
    repo: &mut R,
    max_x: i64,
    max_y: i64,
) -> Result<Matrix> {
    validation::validate_new_dimensions(max_x, max_y)?;
    let matrix = repo.insert_matrix(max_x, max_y)?;
    tracing::debug!(matrix_id = matrix.id, max_x, max_y, "matrix created");
    Ok(matrix)
}

/// Resize a matrix
///
/// Every occupant is checked against the new bounds before anything changes.
///
/// # Errors
/// * `NonPositiveDimensions` / `DimensionsExceedLimit` - dimensions rejected by policy
/// * `MatrixNotFound` - unknown matrix
/// * `OccupantOutOfBounds` - a drone would fall outside the new bounds
pub fn update_matrix<R: FleetRepository + ?Sized>(
    repo: &mut R,
    matrix_id: MatrixId,
    max_x: i64,
    max_y: i64,
    policy: &FleetPolicy,
) -> Result<Matrix> {
    validation::validate_resize_dimensions(max_x, max_y, policy)?;
    let mut matrix = require_matrix(repo, matrix_id)?;
    validation::validate_occupants_fit(repo, matrix_id, max_x, max_y)?;

    matrix.max_x = max_x;
    matrix.max_y = max_y;
    repo.save_matrix(&matrix)?;
    tracing::debug!(matrix_id, max_x, max_y, "matrix resized");
    Ok(matrix)
}

/// Delete an empty matrix
///
/// # Errors
/// * `MatrixNotFound` - unknown matrix
/// * `MatrixOccupied` - drones still reference it (ids listed ascending)
pub fn delete_matrix<R: FleetRepository + ?Sized>(repo: &mut R, matrix_id: MatrixId) -> Result<()> {
    require_matrix(repo, matrix_id)?;

    let mut drone_ids: Vec<_> = repo
        .drones_in_matrix(matrix_id)?
        .into_iter()
        .map(|d| d.id)
        .collect();
    if !drone_ids.is_empty() {
        drone_ids.sort_unstable();
        return Err(FleetError::MatrixOccupied {
            matrix_id,
            drone_ids,
        });
    }

    repo.remove_matrix(matrix_id)?;
    tracing::debug!(matrix_id, "matrix deleted");
    Ok(())
}

/// Fetch one matrix
///
/// # Errors
/// `MatrixNotFound` for an unknown id.
pub fn get_matrix<R: FleetRepository + ?Sized>(repo: &R, matrix_id: MatrixId) -> Result<Matrix> {
    require_matrix(repo, matrix_id)
}

/// All matrices in id order
pub fn list_matrices<R: FleetRepository + ?Sized>(repo: &R) -> Result<Vec<Matrix>> {
    repo.matrices()
}
