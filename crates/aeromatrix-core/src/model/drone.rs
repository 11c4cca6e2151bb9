use serde::{Deserialize, Serialize};

use super::{DroneId, MatrixId, Orientation};

/// A positioned, oriented vehicle owned by exactly one matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    pub id: DroneId,
    pub name: String,
    pub model: String,
    pub x: i64,
    pub y: i64,
    pub orientation: Orientation,
    pub matrix_id: MatrixId,
}

impl Drone {
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

/// Caller-supplied attributes for creating or updating a drone
///
/// Orientation is optional here because its absence is a distinct input error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneDraft {
    pub matrix_id: MatrixId,
    pub name: String,
    pub model: String,
    pub x: i64,
    pub y: i64,
    pub orientation: Option<Orientation>,
}

/// A validated drone awaiting an id from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrone {
    pub name: String,
    pub model: String,
    pub x: i64,
    pub y: i64,
    pub orientation: Orientation,
    pub matrix_id: MatrixId,
}

impl NewDrone {
    /// Attach the id assigned on insert
    pub fn with_id(self, id: DroneId) -> Drone {
        Drone {
            id,
            name: self.name,
            model: self.model,
            x: self.x,
            y: self.y,
            orientation: self.orientation,
            matrix_id: self.matrix_id,
        }
    }
}
