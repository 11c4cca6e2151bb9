//! Flight scenarios over the in-memory store
//!
//! Each test follows one reference situation on a 4x4 matrix.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use aeromatrix_core::{
    apply, apply_in_sequence, ApplyOutcome, BatchItem, Drone, ExErrorKind, FleetCommand,
    FleetError, FleetPolicy, FleetRepository, Matrix, Orientation,
};
use common::{add_drone, draft, store_with_matrix};

use aeromatrix_core::Command::{MoveForward as MF, TurnRight as TR};

#[test]
fn test_reference_route_ends_east_of_start() {
    // GIVEN drone A at (0,0) facing north
    let (state, a) = add_drone(store_with_matrix(4, 4), draft(1, "a", 0, 0, Orientation::North));

    // WHEN it flies MF, MF, TR, MF
    let (state, outcome) = apply(
        state,
        FleetCommand::Execute {
            drone_id: a,
            commands: vec![MF, MF, TR, MF],
        },
        &FleetPolicy::default(),
    )
    .unwrap();

    // THEN it ends at (1,2) facing east, and the store agrees
    let ApplyOutcome::Drone(drone) = outcome else {
        panic!("expected a drone");
    };
    assert_eq!((drone.x, drone.y, drone.orientation), (1, 2, Orientation::East));
    assert_eq!(state.drone(a).unwrap(), Some(drone));
}

#[test]
fn test_edge_move_is_rejected_and_state_kept() {
    // GIVEN drone B at the north-east corner facing north
    let (state, b) = add_drone(store_with_matrix(4, 4), draft(1, "b", 4, 4, Orientation::North));
    let before = state.clone();

    // WHEN it tries to move forward
    let err = apply(
        state,
        FleetCommand::Execute {
            drone_id: b,
            commands: vec![MF],
        },
        &FleetPolicy::default(),
    )
    .unwrap_err();

    // THEN the move is an out-of-bounds conflict and B has not moved
    assert!(matches!(err, FleetError::OutOfBounds { x: 4, y: 5, .. }));
    assert_eq!(err.kind(), ExErrorKind::Conflict);
    let drone = before.drone(b).unwrap().unwrap();
    assert_eq!((drone.x, drone.y, drone.orientation), (4, 4, Orientation::North));
}

#[test]
fn test_collision_leaves_both_drones_in_place() {
    // GIVEN C at (1,1) facing east and D at (2,1)
    let (state, c) = add_drone(store_with_matrix(4, 4), draft(1, "c", 1, 1, Orientation::East));
    let (state, d) = add_drone(state, draft(1, "d", 2, 1, Orientation::North));
    let before = state.clone();

    // WHEN C moves forward into D's cell
    let err = apply(
        state,
        FleetCommand::Execute {
            drone_id: c,
            commands: vec![MF],
        },
        &FleetPolicy::default(),
    )
    .unwrap_err();

    // THEN a collision naming D is reported
    assert_eq!(
        err.to_string(),
        format!("Collision detected between drone {c} and drone {d} at position (2,1)")
    );
    assert_eq!(before.drone(c).unwrap().unwrap().position(), (1, 1));
    assert_eq!(before.drone(d).unwrap().unwrap().position(), (2, 1));
}

#[test]
fn test_in_sequence_commits_prefix_only() {
    // GIVEN A at (0,0) and B at the edge, both facing north
    let (state, a) = add_drone(store_with_matrix(4, 4), draft(1, "a", 0, 0, Orientation::North));
    let (state, b) = add_drone(state, draft(1, "b", 4, 4, Orientation::North));

    // WHEN both fly [MF] in sequence
    let (state, result) = apply_in_sequence(state, &[a, b], &[MF]);

    // THEN A moved, B did not, and B's failure is returned as is
    assert!(matches!(result, Err(FleetError::OutOfBounds { drone_id, .. }) if drone_id == b));
    assert_eq!(state.drone(a).unwrap().unwrap().position(), (0, 1));
    assert_eq!(state.drone(b).unwrap().unwrap().position(), (4, 4));
}

#[test]
fn test_unsupported_token_reported_with_code() {
    let (state, a) = add_drone(store_with_matrix(4, 4), draft(1, "a", 0, 0, Orientation::North));
    let batch = FleetCommand::ExecuteBatch {
        items: vec![BatchItem {
            drone_id: a,
            commands: vec![
                Some("MOVE_FORWARD".to_string()),
                Some("move_forward".to_string()),
            ],
        }],
    };

    let err = apply(state, batch, &FleetPolicy::default()).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported command: move_forward");
    assert_eq!(err.kind().code(), "unsupported_command");
}

#[test]
fn test_leaving_grid_wins_over_later_bad_token() {
    // GIVEN drone A in the north-east corner
    let (state, a) = add_drone(store_with_matrix(4, 4), draft(1, "a", 4, 4, Orientation::North));

    // WHEN its batch moves it off the grid before an unknown token
    let batch = FleetCommand::ExecuteBatch {
        items: vec![BatchItem {
            drone_id: a,
            commands: vec![Some("MOVE_FORWARD".to_string()), Some("JUMP".to_string())],
        }],
    };
    let err = apply(state, batch, &FleetPolicy::default()).unwrap_err();

    // THEN the move's conflict is reported, the token is never reached
    assert!(matches!(err, FleetError::OutOfBounds { drone_id, .. } if drone_id == a));
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_flight_ignores_clash_in_another_matrix() {
    // GIVEN drone A in matrix 1 and two stale drones sharing a cell of matrix 2
    let (mut state, a) =
        add_drone(store_with_matrix(4, 4), draft(1, "a", 0, 0, Orientation::North));
    state.put_matrix(Matrix::new(2, 4, 4));
    for id in [90, 91] {
        state.put_drone(Drone {
            id,
            name: format!("stale-{id}"),
            model: format!("S{id}"),
            x: 3,
            y: 3,
            orientation: Orientation::South,
            matrix_id: 2,
        });
    }

    // WHEN A flies inside matrix 1
    let (_, outcome) = apply(
        state,
        FleetCommand::Execute {
            drone_id: a,
            commands: vec![MF],
        },
        &FleetPolicy::default(),
    )
    .unwrap();

    // THEN the flight succeeds
    match outcome {
        ApplyOutcome::Drone(drone) => assert_eq!(drone.position(), (0, 1)),
        other => panic!("unexpected outcome {other:?}"),
    }
}
