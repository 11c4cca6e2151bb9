//! AeroMatrix Core - fleet domain kernel
//!
//! Drones, matrices and flight commands, with the validation rules that keep
//! a fleet consistent. All operations are generic over
//! [`FleetRepository`](ops::FleetRepository), so they run unchanged over the
//! in-memory [`Store`] and over the SQLite repository in `aeromatrix-store`.
//!
//! - `model` - entities and value types
//! - `rules` - validation and invariant scans
//! - `ops` - matrix, drone and flight operations
//! - `apply` - functional boundary over the in-memory store

pub mod apply;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;
pub mod rules;

pub use aeromatrix_core_types as core_types;

pub use apply::{apply, apply_in_sequence};
pub use commands::{ApplyOutcome, FleetCommand};
pub use config::FleetConfig;
pub use errors::{ExError, ExErrorKind, FleetError, Result};
pub use model::{
    Command, CommandToken, Drone, DroneDraft, DroneId, Matrix, MatrixId, NewDrone, Orientation,
};
pub use ops::flight_ops::BatchItem;
pub use ops::{FleetRepository, Store};
pub use policy::FleetPolicy;
