//! Flight command handlers
//!
//! `execute` and `execute_batch` are single transactions: nothing is written
//! unless every command (and every batch item) succeeds. `execute_in_sequence`
//! commits each drone separately and stops at the first failure.

use std::time::Instant;

use aeromatrix_core::model::{CommandToken, Drone, DroneId};
use aeromatrix_core::ops::flight_ops::{self, BatchItem};
use aeromatrix_core::rules::validation;
use aeromatrix_core::{log_op_end, log_op_start};
use aeromatrix_core_types::RequestContext;
use aeromatrix_store::Result;
use rusqlite::Connection;

use super::{elapsed_ms, fail, in_transaction};

/// Fly one drone through a command list
///
/// Raw tokens are accepted; each is resolved when the flight reaches it.
///
/// ## Errors
///
/// - `InvalidInput`: empty command list
/// - `NotFound`: unknown drone
/// - `Conflict`: the first command that leaves the matrix or hits another drone
/// - `UnsupportedCommand`: the first unknown token reached
pub fn execute<C: CommandToken>(
    conn: &mut Connection,
    ctx: &RequestContext,
    drone_id: DroneId,
    commands: &[C],
) -> Result<Drone> {
    log_op_start!(
        "execute",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_id,
        command_count = commands.len()
    );
    let start = Instant::now();

    let drone = in_transaction(conn, |repo| {
        let drone = flight_ops::execute(repo, drone_id, commands)?;
        validation::validate_matrices(repo, &[drone.matrix_id])?;
        Ok(drone)
    })
    .map_err(|e| fail("execute", ctx, e, start))?;

    log_op_end!(
        "execute",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        x = drone.x,
        y = drone.y
    );
    Ok(drone)
}

/// Fly the same command list through several drones in order
///
/// Drones before a failing one stay committed; later ones are not attempted.
///
/// ## Errors
///
/// The failing drone's error.
pub fn execute_in_sequence<C: CommandToken>(
    conn: &mut Connection,
    ctx: &RequestContext,
    drone_ids: &[DroneId],
    commands: &[C],
) -> Result<()> {
    log_op_start!(
        "execute_in_sequence",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_count = drone_ids.len(),
        command_count = commands.len()
    );
    let start = Instant::now();

    for &drone_id in drone_ids {
        in_transaction(conn, |repo| {
            let drone = flight_ops::execute(repo, drone_id, commands)?;
            validation::validate_matrices(repo, &[drone.matrix_id])
        })
        .map_err(|e| fail("execute_in_sequence", ctx, e, start))?;
        tracing::debug!(drone_id, "sequence step committed");
    }

    log_op_end!(
        "execute_in_sequence",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(())
}

/// Fly a batch of drones, each with its own command list, as one unit
///
/// ## Errors
///
/// - `InvalidInput`: an item has no commands
/// - `NotFound`: an item names an unknown drone
/// - `UnsupportedCommand`: an item carries an unknown token
/// - `Conflict`: a flight conflict, or two drones ending on one cell
pub fn execute_batch(
    conn: &mut Connection,
    ctx: &RequestContext,
    items: &[BatchItem],
) -> Result<()> {
    log_op_start!(
        "execute_batch",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_count = items.len()
    );
    let start = Instant::now();

    in_transaction(conn, |repo| {
        let flown = flight_ops::execute_batch(repo, items)?;
        let touched: Vec<_> = flown.iter().map(|drone| drone.matrix_id).collect();
        validation::validate_matrices(repo, &touched)
    })
    .map_err(|e| fail("execute_batch", ctx, e, start))?;

    log_op_end!(
        "execute_batch",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(())
}
