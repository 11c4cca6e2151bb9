//! Flight command interpreter and execution orchestration
//!
//! [`step`] moves one drone by one command against the current repository
//! contents. The orchestrators on top keep the drone in memory while its
//! command list runs and write it back once at the end, so a failing list
//! never leaves a half-flown drone behind.

use serde::{Deserialize, Serialize};

use crate::errors::{FleetError, Result};
use crate::model::{Command, CommandToken, Drone, DroneId, Matrix};

use super::repository::{require_drone, require_matrix, FleetRepository};

/// One entry of a batch flight request
///
/// Tokens stay raw until the item is reached, so an unsupported token in a
/// later item cannot mask an earlier item's error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub drone_id: DroneId,
    #[serde(default)]
    pub commands: Vec<Option<String>>,
}

impl BatchItem {
    pub fn new(drone_id: DroneId, commands: &[Command]) -> Self {
        Self {
            drone_id,
            commands: commands
                .iter()
                .map(|c| Some(c.as_token().to_string()))
                .collect(),
        }
    }
}

/// Apply a single command to `drone` in place
///
/// Turns never fail. A forward move is rejected when the target cell lies
/// outside `matrix` or is held by another drone of the same matrix; the
/// drone is left untouched in both cases.
///
/// # Errors
/// `OutOfBounds` or `Collision`.
pub fn step<R: FleetRepository + ?Sized>(
    repo: &R,
    drone: &mut Drone,
    matrix: &Matrix,
    command: Command,
) -> Result<()> {
    match command {
        Command::TurnLeft => drone.orientation = drone.orientation.turn_left(),
        Command::TurnRight => drone.orientation = drone.orientation.turn_right(),
        Command::MoveForward => {
            let (dx, dy) = drone.orientation.step();
            let (x, y) = (drone.x + dx, drone.y + dy);

            if !matrix.contains(x, y) {
                return Err(FleetError::OutOfBounds {
                    drone_id: drone.id,
                    x,
                    y,
                    max_x: matrix.max_x,
                    max_y: matrix.max_y,
                });
            }
            if let Some(other) = repo
                .drones_at(x, y, matrix.id)?
                .into_iter()
                .find(|other| other.id != drone.id)
            {
                return Err(FleetError::Collision {
                    drone_id: drone.id,
                    other_id: other.id,
                    x,
                    y,
                });
            }
            drone.x = x;
            drone.y = y;
        }
    }
    Ok(())
}

/// Run a command list against one drone and store the final state
///
/// Each entry is resolved when its turn comes, so an unsupported token only
/// fails the call if every command before it succeeded.
///
/// # Errors
/// * `EmptyCommandList` - nothing to run
/// * `DroneNotFound`
/// * `OutOfBounds` / `Collision` / `UnsupportedCommand` - from the first failing command
pub fn execute<R, C>(repo: &mut R, drone_id: DroneId, commands: &[C]) -> Result<Drone>
where
    R: FleetRepository + ?Sized,
    C: CommandToken,
{
    if commands.is_empty() {
        return Err(FleetError::EmptyCommandList { drone_id: None });
    }
    let mut drone = require_drone(repo, drone_id)?;
    let matrix = require_matrix(repo, drone.matrix_id)?;

    for (index, token) in commands.iter().enumerate() {
        token
            .resolve()
            .and_then(|command| step(repo, &mut drone, &matrix, command))
            .map_err(|err| {
                tracing::debug!(drone_id, index, error = %err, "command rejected");
                err
            })?;
    }

    repo.save_drone(&drone)?;
    tracing::debug!(
        drone_id,
        x = drone.x,
        y = drone.y,
        orientation = %drone.orientation,
        "flight committed"
    );
    Ok(drone)
}

/// Run the same command list against several drones, one after another
///
/// Each drone is committed on its own. On failure the drones before the
/// failing one keep their new state and the ones after it are not attempted.
///
/// # Errors
/// The failing drone's error, unchanged.
pub fn execute_in_sequence<R, C>(repo: &mut R, drone_ids: &[DroneId], commands: &[C]) -> Result<()>
where
    R: FleetRepository + ?Sized,
    C: CommandToken,
{
    for &drone_id in drone_ids {
        execute(repo, drone_id, commands)?;
    }
    Ok(())
}

/// Run a heterogeneous batch
///
/// Items are processed in order; each one is checked for an empty command
/// list and an existing drone before it flies, and its final cell is checked
/// against every other drone afterwards. This function stops at the first
/// failure but does not undo earlier items: callers wrap it in a
/// transaction or work on a disposable copy of the state.
///
/// Returns the final state of each flown drone, in item order.
///
/// # Errors
/// `EmptyCommandList`, `DroneNotFound`, `UnsupportedCommand`, or a flight conflict.
pub fn execute_batch<R: FleetRepository + ?Sized>(
    repo: &mut R,
    items: &[BatchItem],
) -> Result<Vec<Drone>> {
    let mut flown = Vec::with_capacity(items.len());
    for item in items {
        if item.commands.is_empty() {
            return Err(FleetError::EmptyCommandList {
                drone_id: Some(item.drone_id),
            });
        }
        require_drone(repo, item.drone_id)?;
        let drone = execute(repo, item.drone_id, &item.commands)?;
        check_global_collisions(repo, &drone)?;
        flown.push(drone);
    }
    Ok(flown)
}

/// Fail if any other drone shares `drone`'s cell
///
/// # Errors
/// `Collision` naming the first other occupant.
pub fn check_global_collisions<R: FleetRepository + ?Sized>(
    repo: &R,
    drone: &Drone,
) -> Result<()> {
    match repo
        .drones_at(drone.x, drone.y, drone.matrix_id)?
        .into_iter()
        .find(|other| other.id != drone.id)
    {
        Some(other) => Err(FleetError::Collision {
            drone_id: drone.id,
            other_id: other.id,
            x: drone.x,
            y: drone.y,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation::{self, *};
    use crate::ops::Store;

    use crate::model::Command::{MoveForward as MF, TurnLeft as TL, TurnRight as TR};

    fn drone(id: DroneId, x: i64, y: i64, orientation: Orientation) -> Drone {
        Drone {
            id,
            name: format!("d{id}"),
            model: format!("m{id}"),
            x,
            y,
            orientation,
            matrix_id: 1,
        }
    }

    fn grid(drones: &[Drone]) -> Store {
        let mut store = Store::new();
        store.put_matrix(Matrix::new(1, 4, 4));
        for d in drones {
            store.put_drone(d.clone());
        }
        store
    }

    #[test]
    fn test_turns_keep_position() {
        let store = grid(&[]);
        let matrix = Matrix::new(1, 4, 4);
        let mut d = drone(1, 2, 2, North);
        step(&store, &mut d, &matrix, TL).unwrap();
        assert_eq!(d.orientation, West);
        step(&store, &mut d, &matrix, TR).unwrap();
        step(&store, &mut d, &matrix, TR).unwrap();
        assert_eq!(d.orientation, East);
        assert_eq!(d.position(), (2, 2));
    }

    #[test]
    fn test_move_below_zero_is_out_of_bounds() {
        let store = grid(&[]);
        let mut d = drone(1, 0, 0, South);
        let err = step(&store, &mut d, &Matrix::new(1, 4, 4), MF).unwrap_err();
        assert!(matches!(err, FleetError::OutOfBounds { x: 0, y: -1, .. }));
        assert_eq!(d, drone(1, 0, 0, South));
    }

    #[test]
    fn test_execute_reference_route() {
        let mut store = grid(&[drone(1, 0, 0, North)]);
        let flown = execute(&mut store, 1, &[MF, MF, TR, MF]).unwrap();
        assert_eq!((flown.x, flown.y, flown.orientation), (1, 2, East));
        assert_eq!(store.drone(1).unwrap(), Some(flown));
    }

    #[test]
    fn test_execute_failure_commits_nothing() {
        let mut store = grid(&[drone(1, 0, 3, North)]);
        let err = execute(&mut store, 1, &[TR, TL, MF, MF]).unwrap_err();
        assert!(matches!(
            err,
            FleetError::OutOfBounds {
                drone_id: 1,
                x: 0,
                y: 5,
                ..
            }
        ));
        assert_eq!(store.drone(1).unwrap(), Some(drone(1, 0, 3, North)));
    }

    #[test]
    fn test_execute_empty_and_missing() {
        let mut store = grid(&[]);
        assert_eq!(
            execute::<_, Command>(&mut store, 1, &[]),
            Err(FleetError::EmptyCommandList { drone_id: None })
        );
        assert_eq!(
            execute(&mut store, 1, &[MF]),
            Err(FleetError::DroneNotFound { drone_id: 1 })
        );
    }

    #[test]
    fn test_collision_names_other_drone() {
        let mut store = grid(&[drone(1, 1, 1, East), drone(2, 2, 1, North)]);
        let err = execute(&mut store, 1, &[MF]).unwrap_err();
        assert_eq!(
            err,
            FleetError::Collision {
                drone_id: 1,
                other_id: 2,
                x: 2,
                y: 1
            }
        );
        assert_eq!(store.drone(1).unwrap(), Some(drone(1, 1, 1, East)));
    }

    #[test]
    fn test_sequence_keeps_earlier_drones() {
        let mut store = grid(&[
            drone(1, 0, 0, North),
            drone(2, 4, 4, North),
            drone(3, 0, 2, East),
        ]);
        let err = execute_in_sequence(&mut store, &[1, 2, 3], &[MF]).unwrap_err();
        assert!(matches!(err, FleetError::OutOfBounds { drone_id: 2, .. }));
        assert_eq!(store.drone(1).unwrap().unwrap().position(), (0, 1));
        assert_eq!(store.drone(2).unwrap().unwrap().position(), (4, 4));
        assert_eq!(store.drone(3).unwrap().unwrap().position(), (0, 2));
    }

    #[test]
    fn test_batch_checks_items_in_order() {
        let mut store = grid(&[drone(1, 0, 0, North)]);
        let items = vec![
            BatchItem::new(1, &[MF]),
            BatchItem {
                drone_id: 5,
                commands: vec![],
            },
            BatchItem {
                drone_id: 1,
                commands: vec![Some("JUMP".to_string())],
            },
        ];
        let err = execute_batch(&mut store, &items).unwrap_err();
        assert_eq!(err.to_string(), "Drone 5 has no commands to execute.");
    }

    #[test]
    fn test_batch_rejects_null_token() {
        let mut store = grid(&[drone(1, 0, 0, North)]);
        let items = vec![BatchItem {
            drone_id: 1,
            commands: vec![None],
        }];
        let err = execute_batch(&mut store, &items).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported command: null");
    }

    #[test]
    fn test_global_collision_check() {
        let store = grid(&[drone(1, 3, 3, North), drone(2, 3, 3, South)]);
        let err = check_global_collisions(&store, &drone(1, 3, 3, North)).unwrap_err();
        assert!(matches!(err, FleetError::Collision { other_id: 2, .. }));
    }

    #[test]
    fn test_bad_token_after_failing_move_is_not_reached() {
        let mut store = grid(&[drone(1, 4, 4, North)]);
        let tokens = ["MOVE_FORWARD", "JUMP"];
        let err = execute(&mut store, 1, &tokens).unwrap_err();
        assert!(matches!(err, FleetError::OutOfBounds { drone_id: 1, .. }));

        let items = vec![BatchItem {
            drone_id: 1,
            commands: vec![Some("MOVE_FORWARD".to_string()), Some("JUMP".to_string())],
        }];
        let err = execute_batch(&mut store, &items).unwrap_err();
        assert!(matches!(err, FleetError::OutOfBounds { drone_id: 1, .. }));
        assert_eq!(store.drone(1).unwrap(), Some(drone(1, 4, 4, North)));
    }

    #[test]
    fn test_missing_drone_reported_before_bad_token() {
        let mut store = grid(&[]);
        assert_eq!(
            execute(&mut store, 99, &["JUMP"]),
            Err(FleetError::DroneNotFound { drone_id: 99 })
        );
    }

    #[test]
    fn test_bad_token_stops_flight_without_saving() {
        let mut store = grid(&[drone(1, 0, 0, North)]);
        let tokens = ["MOVE_FORWARD", "JUMP", "MOVE_FORWARD"];
        let err = execute(&mut store, 1, &tokens).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported command: JUMP");
        assert_eq!(store.drone(1).unwrap(), Some(drone(1, 0, 0, North)));
    }
}
