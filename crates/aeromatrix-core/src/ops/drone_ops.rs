//! Drone lifecycle operations

use crate::errors::Result;
use crate::model::{Drone, DroneDraft, DroneId, NewDrone};
use crate::policy::FleetPolicy;
use crate::rules::validation;

use super::repository::{require_drone, require_matrix, FleetRepository};

/// Place a new drone in a matrix
///
/// Checks run in a fixed order: request shape, matrix lookup, bounds, name,
/// model, then position.
///
/// # Errors
/// * `InvalidInput` kinds - blank/too long labels, missing orientation
/// * `MatrixNotFound` - unknown matrix
/// * `Conflict` kinds - out of bounds, duplicate name/model, occupied cell
pub fn create_drone<R: FleetRepository + ?Sized>(
    repo: &mut R,
    draft: DroneDraft,
    policy: &FleetPolicy,
) -> Result<Drone> {
    let orientation = validation::validate_drone_input(&draft, policy)?;
    let matrix = require_matrix(repo, draft.matrix_id)?;
    validation::validate_position(&matrix, draft.x, draft.y)?;
    validation::validate_new_drone_uniqueness(repo, &draft)?;

    let drone = repo.insert_drone(NewDrone {
        name: draft.name,
        model: draft.model,
        x: draft.x,
        y: draft.y,
        orientation,
        matrix_id: draft.matrix_id,
    })?;
    tracing::debug!(drone_id = drone.id, matrix_id = drone.matrix_id, "drone created");
    Ok(drone)
}

/// Overwrite all six mutable attributes of a drone
///
/// The target matrix may differ from the current one; bounds and uniqueness
/// are then judged against the target.
///
/// # Errors
/// * `InvalidInput` kinds - as for [`create_drone`]
/// * `DroneNotFound` / `MatrixNotFound`
/// * `Conflict` kinds - bounds, uniqueness, or `NoChangesDetected`
pub fn update_drone<R: FleetRepository + ?Sized>(
    repo: &mut R,
    drone_id: DroneId,
    draft: DroneDraft,
    policy: &FleetPolicy,
) -> Result<Drone> {
    let orientation = validation::validate_drone_input(&draft, policy)?;
    let current = require_drone(repo, drone_id)?;
    let matrix = require_matrix(repo, draft.matrix_id)?;
    validation::validate_position(&matrix, draft.x, draft.y)?;
    validation::validate_label_uniqueness(repo, &current, &draft)?;
    validation::validate_position_conflict(repo, &current, &draft)?;
    validation::validate_has_changes(&current, &draft, orientation)?;

    let updated = Drone {
        id: current.id,
        name: draft.name,
        model: draft.model,
        x: draft.x,
        y: draft.y,
        orientation,
        matrix_id: draft.matrix_id,
    };
    repo.save_drone(&updated)?;
    tracing::debug!(drone_id, matrix_id = updated.matrix_id, "drone updated");
    Ok(updated)
}

/// Remove a drone, returning it as it was
///
/// # Errors
/// `DroneNotFound` for an unknown id.
pub fn delete_drone<R: FleetRepository + ?Sized>(repo: &mut R, drone_id: DroneId) -> Result<Drone> {
    let drone = require_drone(repo, drone_id)?;
    repo.remove_drone(drone_id)?;
    tracing::debug!(drone_id, "drone deleted");
    Ok(drone)
}

pub fn get_drone<R: FleetRepository + ?Sized>(repo: &R, drone_id: DroneId) -> Result<Drone> {
    require_drone(repo, drone_id)
}

pub fn list_drones<R: FleetRepository + ?Sized>(repo: &R) -> Result<Vec<Drone>> {
    repo.drones()
}
