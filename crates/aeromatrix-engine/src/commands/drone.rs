//! Drone command handlers

use std::time::Instant;

use aeromatrix_core::model::{Drone, DroneDraft, DroneId};
use aeromatrix_core::ops::drone_ops;
use aeromatrix_core::policy::FleetPolicy;
use aeromatrix_core::{log_op_end, log_op_start};
use aeromatrix_core_types::RequestContext;
use aeromatrix_store::{Result, SqliteFleetRepo};
use rusqlite::Connection;

use super::{elapsed_ms, fail, in_transaction};

/// Place a new drone
///
/// ## Errors
///
/// - `InvalidInput`: blank or over-long name/model, missing orientation
/// - `NotFound`: unknown matrix
/// - `Conflict`: out of bounds, or name, model or cell already used in the matrix
pub fn create_drone(
    conn: &mut Connection,
    ctx: &RequestContext,
    draft: DroneDraft,
    policy: &FleetPolicy,
) -> Result<Drone> {
    log_op_start!(
        "create_drone",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        matrix_id = draft.matrix_id
    );
    let start = Instant::now();

    let drone = in_transaction(conn, |repo| drone_ops::create_drone(repo, draft, policy))
        .map_err(|e| fail("create_drone", ctx, e, start))?;

    log_op_end!(
        "create_drone",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_id = drone.id
    );
    Ok(drone)
}

/// Overwrite a drone's attributes
///
/// ## Errors
///
/// - `InvalidInput`: as for [`create_drone`]
/// - `NotFound`: unknown drone or target matrix
/// - `Conflict`: bounds, uniqueness, or no attribute changed
pub fn update_drone(
    conn: &mut Connection,
    ctx: &RequestContext,
    drone_id: DroneId,
    draft: DroneDraft,
    policy: &FleetPolicy,
) -> Result<Drone> {
    log_op_start!(
        "update_drone",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_id
    );
    let start = Instant::now();

    let drone = in_transaction(conn, |repo| {
        drone_ops::update_drone(repo, drone_id, draft, policy)
    })
    .map_err(|e| fail("update_drone", ctx, e, start))?;

    log_op_end!(
        "update_drone",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(drone)
}

/// Delete a drone and return it as it was
///
/// ## Errors
///
/// - `NotFound`: unknown drone
pub fn delete_drone(
    conn: &mut Connection,
    ctx: &RequestContext,
    drone_id: DroneId,
) -> Result<Drone> {
    log_op_start!(
        "delete_drone",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_id
    );
    let start = Instant::now();

    let drone = in_transaction(conn, |repo| drone_ops::delete_drone(repo, drone_id))
        .map_err(|e| fail("delete_drone", ctx, e, start))?;

    log_op_end!(
        "delete_drone",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(drone)
}

pub fn get_drone(conn: &Connection, ctx: &RequestContext, drone_id: DroneId) -> Result<Drone> {
    log_op_start!(
        "get_drone",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        drone_id
    );
    let start = Instant::now();

    let drone = drone_ops::get_drone(&SqliteFleetRepo::new(conn), drone_id)
        .map_err(|e| fail("get_drone", ctx, e.into(), start))?;

    log_op_end!(
        "get_drone",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(drone)
}

pub fn list_drones(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Drone>> {
    log_op_start!(
        "list_drones",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    let start = Instant::now();

    let drones = drone_ops::list_drones(&SqliteFleetRepo::new(conn))
        .map_err(|e| fail("list_drones", ctx, e.into(), start))?;

    log_op_end!(
        "list_drones",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        count = drones.len()
    );
    Ok(drones)
}
