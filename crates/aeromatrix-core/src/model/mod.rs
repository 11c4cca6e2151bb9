pub mod command;
pub mod drone;
pub mod matrix;
pub mod orientation;

pub use command::{Command, CommandToken};
pub use drone::{Drone, DroneDraft, NewDrone};
pub use matrix::Matrix;
pub use orientation::Orientation;

/// Row identifier of a matrix
pub type MatrixId = i64;

/// Row identifier of a drone
pub type DroneId = i64;
