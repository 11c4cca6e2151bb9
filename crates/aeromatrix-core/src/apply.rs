//! Functional-boundary apply function
//!
//! `apply()` takes the current in-memory state by value and hands back either
//! the next state or an error. The caller keeps its own clone if it wants the
//! old state after a failure, which makes every top-level mutation
//! all-or-nothing without any transaction machinery.
//!
//! ## Example
//!
//! ```
//! use aeromatrix_core::{apply::apply, FleetCommand, FleetPolicy, Store};
//!
//! let (state, _) = apply(
//!     Store::new(),
//!     FleetCommand::MatrixCreate { max_x: 4, max_y: 4 },
//!     &FleetPolicy::default(),
//! )
//! .unwrap();
//! assert_eq!(state.matrix_count(), 1);
//! ```

use crate::commands::{ApplyOutcome, FleetCommand};
use crate::errors::Result;
use crate::model::{Command, DroneId};
use crate::ops::{drone_ops, flight_ops, matrix_ops, Store};
use crate::policy::FleetPolicy;
use crate::rules::validation;

/// Apply one fleet mutation to a store
///
/// Flight commands are followed by an invariant check over the matrices
/// they flew in.
///
/// # Errors
///
/// Any validation, lookup or flight error raised by the command. The state
/// passed in is consumed; callers that need it afterwards clone it first.
pub fn apply(
    mut state: Store,
    cmd: FleetCommand,
    policy: &FleetPolicy,
) -> Result<(Store, ApplyOutcome)> {
    let outcome = match cmd {
        FleetCommand::MatrixCreate { max_x, max_y } => {
            ApplyOutcome::Matrix(matrix_ops::create_matrix(&mut state, max_x, max_y)?)
        }
        FleetCommand::MatrixResize {
            matrix_id,
            max_x,
            max_y,
        } => ApplyOutcome::Matrix(matrix_ops::update_matrix(
            &mut state, matrix_id, max_x, max_y, policy,
        )?),
        FleetCommand::MatrixDelete { matrix_id } => {
            matrix_ops::delete_matrix(&mut state, matrix_id)?;
            ApplyOutcome::Done
        }
        FleetCommand::DroneCreate { draft } => {
            ApplyOutcome::Drone(drone_ops::create_drone(&mut state, draft, policy)?)
        }
        FleetCommand::DroneUpdate { drone_id, draft } => {
            ApplyOutcome::Drone(drone_ops::update_drone(&mut state, drone_id, draft, policy)?)
        }
        FleetCommand::DroneDelete { drone_id } => {
            ApplyOutcome::Drone(drone_ops::delete_drone(&mut state, drone_id)?)
        }
        FleetCommand::Execute { drone_id, commands } => {
            let drone = flight_ops::execute(&mut state, drone_id, &commands)?;
            validation::validate_matrices(&state, &[drone.matrix_id])?;
            ApplyOutcome::Drone(drone)
        }
        FleetCommand::ExecuteBatch { items } => {
            let flown = flight_ops::execute_batch(&mut state, &items)?;
            let touched: Vec<_> = flown.iter().map(|drone| drone.matrix_id).collect();
            validation::validate_matrices(&state, &touched)?;
            ApplyOutcome::Done
        }
    };

    Ok((state, outcome))
}

/// Fly the same command list through several drones, one unit per drone
///
/// Unlike [`apply`], this does not discard earlier work on failure: the
/// returned store holds every drone committed before the failing one,
/// paired with that drone's error.
pub fn apply_in_sequence(
    mut state: Store,
    drone_ids: &[DroneId],
    commands: &[Command],
) -> (Store, Result<()>) {
    for &drone_id in drone_ids {
        let snapshot = state.clone();
        match apply(
            state,
            FleetCommand::Execute {
                drone_id,
                commands: commands.to_vec(),
            },
            &FleetPolicy::default(),
        ) {
            Ok((next, _)) => state = next,
            Err(err) => return (snapshot, Err(err)),
        }
    }
    (state, Ok(()))
}
