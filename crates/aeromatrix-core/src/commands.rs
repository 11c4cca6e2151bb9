//! Top-level fleet mutations
//!
//! Each variant is one unit of work for [`apply`](crate::apply::apply).

use serde::Serialize;

use crate::model::{Command, Drone, DroneDraft, DroneId, Matrix, MatrixId};
use crate::ops::flight_ops::BatchItem;

#[derive(Debug, Clone, PartialEq)]
pub enum FleetCommand {
    MatrixCreate {
        max_x: i64,
        max_y: i64,
    },

    /// Change both dimensions of a matrix
    MatrixResize {
        matrix_id: MatrixId,
        max_x: i64,
        max_y: i64,
    },

    MatrixDelete {
        matrix_id: MatrixId,
    },

    DroneCreate {
        draft: DroneDraft,
    },

    /// Overwrite every mutable attribute of a drone
    DroneUpdate {
        drone_id: DroneId,
        draft: DroneDraft,
    },

    DroneDelete {
        drone_id: DroneId,
    },

    /// Fly one drone through a command list
    Execute {
        drone_id: DroneId,
        commands: Vec<Command>,
    },

    /// Fly several drones with individual command lists as one unit
    ExecuteBatch {
        items: Vec<BatchItem>,
    },
}

impl FleetCommand {
    /// Operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            FleetCommand::MatrixCreate { .. } => "create_matrix",
            FleetCommand::MatrixResize { .. } => "update_matrix",
            FleetCommand::MatrixDelete { .. } => "delete_matrix",
            FleetCommand::DroneCreate { .. } => "create_drone",
            FleetCommand::DroneUpdate { .. } => "update_drone",
            FleetCommand::DroneDelete { .. } => "delete_drone",
            FleetCommand::Execute { .. } => "execute",
            FleetCommand::ExecuteBatch { .. } => "execute_batch",
        }
    }
}

/// What a successful mutation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApplyOutcome {
    Matrix(Matrix),
    Drone(Drone),
    /// Deletions of matrices and batch flights return nothing
    Done,
}
