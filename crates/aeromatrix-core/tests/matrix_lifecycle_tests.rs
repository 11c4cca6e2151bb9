#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use aeromatrix_core::errors::ExError;
use aeromatrix_core::{
    apply, ApplyOutcome, FleetCommand, FleetError, FleetPolicy, FleetRepository, Matrix,
    Orientation,
};
use common::{add_drone, draft, store_with_matrix};

#[test]
fn test_resize_rejected_when_occupant_would_fall_outside() {
    // GIVEN a 5x5 matrix with a drone at (5,5)
    let (state, d) = add_drone(store_with_matrix(5, 5), draft(1, "edge", 5, 5, Orientation::South));
    let original = state.clone();

    // WHEN the matrix is shrunk to 4x4
    let err = apply(
        state,
        FleetCommand::MatrixResize {
            matrix_id: 1,
            max_x: 4,
            max_y: 4,
        },
        &FleetPolicy::default(),
    )
    .unwrap_err();

    // THEN the resize is a conflict naming the drone, and nothing changed
    assert_eq!(
        err,
        FleetError::OccupantOutOfBounds {
            drone_id: d,
            max_x: 4,
            max_y: 4
        }
    );
    assert_eq!(original.matrix(1).unwrap(), Some(Matrix::new(1, 5, 5)));
}

#[test]
fn test_resize_respects_configured_limit() {
    let policy = FleetPolicy::default().with_max_dimension(10);
    let err = apply(
        store_with_matrix(4, 4),
        FleetCommand::MatrixResize {
            matrix_id: 1,
            max_x: 11,
            max_y: 4,
        },
        &policy,
    )
    .unwrap_err();
    assert_eq!(err, FleetError::DimensionsExceedLimit { limit: 10 });

    let (_, outcome) = apply(
        store_with_matrix(4, 4),
        FleetCommand::MatrixResize {
            matrix_id: 1,
            max_x: 10,
            max_y: 4,
        },
        &policy,
    )
    .unwrap();
    assert_eq!(outcome, ApplyOutcome::Matrix(Matrix::new(1, 10, 4)));
}

#[test]
fn test_delete_occupied_matrix_lists_blockers() {
    // GIVEN a matrix holding two drones
    let (state, a) = add_drone(store_with_matrix(4, 4), draft(1, "a", 0, 0, Orientation::North));
    let (state, b) = add_drone(state, draft(1, "b", 1, 0, Orientation::North));

    // WHEN it is deleted
    let err = apply(
        state,
        FleetCommand::MatrixDelete { matrix_id: 1 },
        &FleetPolicy::default(),
    )
    .unwrap_err();

    // THEN the conflict lists both drones in ascending order
    let ex: ExError = err.into();
    assert_eq!(ex.code(), "conflict");
    assert_eq!(
        ex.blocking_ids(),
        Some(&[a.to_string(), b.to_string()][..])
    );
    assert_eq!(ex.message(), format!("Cannot delete matrix 1. Active drones: {a}, {b}"));
}

#[test]
fn test_create_matrix_with_zero_dimension_is_invalid_input() {
    let err = apply(
        store_with_matrix(1, 1),
        FleetCommand::MatrixCreate { max_x: 3, max_y: 0 },
        &FleetPolicy::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind().code(), "invalid_input");
}
