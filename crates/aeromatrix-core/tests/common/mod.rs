use aeromatrix_core::{apply, DroneDraft, FleetCommand, FleetPolicy, Orientation, Store};

/// Store holding a single `max_x` x `max_y` matrix (id 1)
#[allow(dead_code)]
pub fn store_with_matrix(max_x: i64, max_y: i64) -> Store {
    let (state, _) = apply(
        Store::new(),
        FleetCommand::MatrixCreate { max_x, max_y },
        &FleetPolicy::default(),
    )
    .unwrap();
    state
}

/// Draft with name and model derived from `label`
#[allow(dead_code)]
pub fn draft(matrix_id: i64, label: &str, x: i64, y: i64, orientation: Orientation) -> DroneDraft {
    DroneDraft {
        matrix_id,
        name: format!("{label}-name"),
        model: format!("{label}-model"),
        x,
        y,
        orientation: Some(orientation),
    }
}

/// Create a drone through `apply`, returning the new state and the drone id
#[allow(dead_code)]
pub fn add_drone(state: Store, draft: DroneDraft) -> (Store, i64) {
    let (state, outcome) =
        apply(state, FleetCommand::DroneCreate { draft }, &FleetPolicy::default()).unwrap();
    match outcome {
        aeromatrix_core::ApplyOutcome::Drone(drone) => (state, drone.id),
        other => panic!("expected a drone, got {other:?}"),
    }
}
