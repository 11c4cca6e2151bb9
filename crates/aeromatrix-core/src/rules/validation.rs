//! Validation layer for drone and matrix mutations
//!
//! Each check returns the first violation it finds. The operations in
//! `ops` call them in a fixed order (input shape, lookups, bounds,
//! uniqueness, no-op detection) so that a request violating several rules
//! always reports the same error.

use std::collections::BTreeSet;

use crate::errors::{FleetError, Result};
use crate::model::{Drone, DroneDraft, Matrix, MatrixId, Orientation};
use crate::ops::FleetRepository;
use crate::policy::FleetPolicy;

use super::invariants;

/// Check the request shape of a drone create/update
///
/// Returns the orientation, which is known to be present afterwards.
///
/// # Errors
/// * `BlankName` / `BlankModel` - empty or whitespace-only label
/// * `LabelTooLong` - label longer than the policy allows
/// * `MissingOrientation` - orientation absent
pub fn validate_drone_input(draft: &DroneDraft, policy: &FleetPolicy) -> Result<Orientation> {
    if draft.name.trim().is_empty() {
        return Err(FleetError::BlankName);
    }
    if draft.model.trim().is_empty() {
        return Err(FleetError::BlankModel);
    }
    if draft.name.chars().count() > policy.max_label_len {
        return Err(FleetError::LabelTooLong {
            field: "name",
            max: policy.max_label_len,
        });
    }
    if draft.model.chars().count() > policy.max_label_len {
        return Err(FleetError::LabelTooLong {
            field: "model",
            max: policy.max_label_len,
        });
    }
    draft.orientation.ok_or(FleetError::MissingOrientation)
}

/// Check that `(x, y)` is a legal cell of `matrix`
///
/// # Errors
/// `PositionOutOfBounds` naming the coordinates and the matrix limits.
pub fn validate_position(matrix: &Matrix, x: i64, y: i64) -> Result<()> {
    if !matrix.contains(x, y) {
        return Err(FleetError::PositionOutOfBounds {
            x,
            y,
            matrix_id: matrix.id,
            max_x: matrix.max_x,
            max_y: matrix.max_y,
        });
    }
    Ok(())
}

/// Uniqueness checks for a brand-new drone
///
/// # Errors
/// `DuplicateName`, `DuplicateModel` or `PositionOccupied`, in that order.
pub fn validate_new_drone_uniqueness<R: FleetRepository + ?Sized>(
    repo: &R,
    draft: &DroneDraft,
) -> Result<()> {
    let matrix_id = draft.matrix_id;
    if repo.drone_name_taken(&draft.name, matrix_id)? {
        return Err(FleetError::DuplicateName {
            name: draft.name.clone(),
            matrix_id,
        });
    }
    if repo.drone_model_taken(&draft.model, matrix_id)? {
        return Err(FleetError::DuplicateModel {
            model: draft.model.clone(),
            matrix_id,
        });
    }
    if !repo.drones_at(draft.x, draft.y, matrix_id)?.is_empty() {
        return Err(FleetError::PositionOccupied {
            x: draft.x,
            y: draft.y,
            matrix_id,
        });
    }
    Ok(())
}

/// Name/model uniqueness for an update
///
/// A label is only re-checked when it changes or when the drone moves to
/// another matrix, so a drone never conflicts with its own current values.
///
/// # Errors
/// `DuplicateName` or `DuplicateModel`.
pub fn validate_label_uniqueness<R: FleetRepository + ?Sized>(
    repo: &R,
    current: &Drone,
    draft: &DroneDraft,
) -> Result<()> {
    let matrix_id = draft.matrix_id;
    let moving = current.matrix_id != matrix_id;

    if (moving || current.name != draft.name) && repo.drone_name_taken(&draft.name, matrix_id)? {
        return Err(FleetError::DuplicateName {
            name: draft.name.clone(),
            matrix_id,
        });
    }
    if (moving || current.model != draft.model)
        && repo.drone_model_taken(&draft.model, matrix_id)?
    {
        return Err(FleetError::DuplicateModel {
            model: draft.model.clone(),
            matrix_id,
        });
    }
    Ok(())
}

/// Position uniqueness for an update, checked only when the cell or matrix changes
///
/// # Errors
/// `PositionOccupied` if another drone holds the target cell.
pub fn validate_position_conflict<R: FleetRepository + ?Sized>(
    repo: &R,
    current: &Drone,
    draft: &DroneDraft,
) -> Result<()> {
    let relocating =
        current.position() != (draft.x, draft.y) || current.matrix_id != draft.matrix_id;
    if !relocating {
        return Ok(());
    }
    let occupied = repo
        .drones_at(draft.x, draft.y, draft.matrix_id)?
        .iter()
        .any(|other| other.id != current.id);
    if occupied {
        return Err(FleetError::PositionOccupied {
            x: draft.x,
            y: draft.y,
            matrix_id: draft.matrix_id,
        });
    }
    Ok(())
}

/// Reject an update that would leave every attribute as it is
///
/// # Errors
/// `NoChangesDetected`.
pub fn validate_has_changes(
    current: &Drone,
    draft: &DroneDraft,
    orientation: Orientation,
) -> Result<()> {
    let unchanged = current.x == draft.x
        && current.y == draft.y
        && current.orientation == orientation
        && current.matrix_id == draft.matrix_id
        && current.name == draft.name
        && current.model == draft.model;
    if unchanged {
        return Err(FleetError::NoChangesDetected {
            drone_id: current.id,
        });
    }
    Ok(())
}

/// Dimension checks applied when a matrix is created
///
/// # Errors
/// `InvalidDimensions` if either dimension is not positive.
pub fn validate_new_dimensions(max_x: i64, max_y: i64) -> Result<()> {
    if max_x <= 0 || max_y <= 0 {
        return Err(FleetError::InvalidDimensions { max_x, max_y });
    }
    Ok(())
}

/// Dimension checks applied when a matrix is resized
///
/// # Errors
/// `NonPositiveDimensions` or `DimensionsExceedLimit`.
pub fn validate_resize_dimensions(max_x: i64, max_y: i64, policy: &FleetPolicy) -> Result<()> {
    if max_x <= 0 || max_y <= 0 {
        return Err(FleetError::NonPositiveDimensions { max_x, max_y });
    }
    if !policy.allows_dimension(max_x) || !policy.allows_dimension(max_y) {
        return Err(FleetError::DimensionsExceedLimit {
            limit: policy.max_dimension,
        });
    }
    Ok(())
}

/// Check every occupant of a matrix against prospective bounds
///
/// All occupants are inspected before the caller mutates anything.
///
/// # Errors
/// `OccupantOutOfBounds` naming the first (lowest id) drone that would not fit.
pub fn validate_occupants_fit<R: FleetRepository + ?Sized>(
    repo: &R,
    matrix_id: MatrixId,
    max_x: i64,
    max_y: i64,
) -> Result<()> {
    let resized = Matrix::new(matrix_id, max_x, max_y);
    if let Some(drone) = repo
        .drones_in_matrix(matrix_id)?
        .into_iter()
        .find(|d| !resized.contains(d.x, d.y))
    {
        return Err(FleetError::OccupantOutOfBounds {
            drone_id: drone.id,
            max_x,
            max_y,
        });
    }
    Ok(())
}

/// Verify the bounds and no-clash invariants inside the given matrices
///
/// Used as a post-condition after flight execution, scoped to the matrices
/// the flight touched. Duplicate ids are checked once.
///
/// # Errors
/// `InvariantBroken` describing the first violation found.
pub fn validate_matrices<R: FleetRepository + ?Sized>(
    repo: &R,
    matrix_ids: &[MatrixId],
) -> Result<()> {
    let scope: BTreeSet<MatrixId> = matrix_ids.iter().copied().collect();
    for matrix_id in scope {
        if let Some(&(_, drone_id)) = invariants::find_out_of_bounds_in(repo, matrix_id)?.first() {
            return Err(FleetError::InvariantBroken {
                matrix_id,
                detail: format!("drone {drone_id} lies outside the matrix bounds"),
            });
        }
        if let Some(clash) = invariants::find_position_clashes_in(repo, matrix_id)?.first() {
            return Err(FleetError::InvariantBroken {
                matrix_id,
                detail: format!(
                    "drones {:?} share position ({},{})",
                    clash.drone_ids, clash.x, clash.y
                ),
            });
        }
    }
    Ok(())
}
