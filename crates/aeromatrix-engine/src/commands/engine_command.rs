//! Single dispatch entry for every fleet mutation

use aeromatrix_core::model::{Command, DroneId};
use aeromatrix_core::policy::FleetPolicy;
use aeromatrix_core::{ApplyOutcome, FleetCommand};
use aeromatrix_core_types::RequestContext;
use aeromatrix_store::Result;
use rusqlite::Connection;

use super::{drone, flight, matrix};

/// Mutations the engine can run against the database
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Any single-unit fleet mutation
    Fleet(FleetCommand),
    /// Same command list for several drones, one unit per drone
    ExecuteInSequence {
        drone_ids: Vec<DroneId>,
        commands: Vec<Command>,
    },
}

impl From<FleetCommand> for EngineCommand {
    fn from(cmd: FleetCommand) -> Self {
        EngineCommand::Fleet(cmd)
    }
}

/// Run an engine command through the matching handler
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    ctx: &RequestContext,
    policy: &FleetPolicy,
) -> Result<ApplyOutcome> {
    let cmd = match cmd {
        EngineCommand::Fleet(cmd) => cmd,
        EngineCommand::ExecuteInSequence {
            drone_ids,
            commands,
        } => {
            flight::execute_in_sequence(conn, ctx, &drone_ids, &commands)?;
            return Ok(ApplyOutcome::Done);
        }
    };
    tracing::debug!(op = cmd.op_name(), "dispatching fleet command");

    let outcome = match cmd {
        FleetCommand::MatrixCreate { max_x, max_y } => {
            ApplyOutcome::Matrix(matrix::create_matrix(conn, ctx, max_x, max_y)?)
        }
        FleetCommand::MatrixResize {
            matrix_id,
            max_x,
            max_y,
        } => ApplyOutcome::Matrix(matrix::update_matrix(
            conn, ctx, matrix_id, max_x, max_y, policy,
        )?),
        FleetCommand::MatrixDelete { matrix_id } => {
            matrix::delete_matrix(conn, ctx, matrix_id)?;
            ApplyOutcome::Done
        }
        FleetCommand::DroneCreate { draft } => {
            ApplyOutcome::Drone(drone::create_drone(conn, ctx, draft, policy)?)
        }
        FleetCommand::DroneUpdate { drone_id, draft } => {
            ApplyOutcome::Drone(drone::update_drone(conn, ctx, drone_id, draft, policy)?)
        }
        FleetCommand::DroneDelete { drone_id } => {
            ApplyOutcome::Drone(drone::delete_drone(conn, ctx, drone_id)?)
        }
        FleetCommand::Execute { drone_id, commands } => {
            ApplyOutcome::Drone(flight::execute(conn, ctx, drone_id, &commands)?)
        }
        FleetCommand::ExecuteBatch { items } => {
            flight::execute_batch(conn, ctx, &items)?;
            ApplyOutcome::Done
        }
    };
    Ok(outcome)
}
