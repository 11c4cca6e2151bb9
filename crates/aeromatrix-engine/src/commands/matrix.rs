//! Matrix command handlers

use std::time::Instant;

use aeromatrix_core::model::{Matrix, MatrixId};
use aeromatrix_core::ops::matrix_ops;
use aeromatrix_core::policy::FleetPolicy;
use aeromatrix_core::{log_op_end, log_op_start};
use aeromatrix_core_types::RequestContext;
use aeromatrix_store::{Result, SqliteFleetRepo};
use rusqlite::Connection;

use super::{elapsed_ms, fail, in_transaction};

/// Create a matrix
///
/// ## Errors
///
/// - `InvalidInput`: a dimension is not positive
/// - `Persistence`: database error
pub fn create_matrix(
    conn: &mut Connection,
    ctx: &RequestContext,
    max_x: i64,
    max_y: i64,
) -> Result<Matrix> {
    log_op_start!(
        "create_matrix",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        max_x,
        max_y
    );
    let start = Instant::now();

    let matrix = in_transaction(conn, |repo| matrix_ops::create_matrix(repo, max_x, max_y))
        .map_err(|e| fail("create_matrix", ctx, e, start))?;

    log_op_end!(
        "create_matrix",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        matrix_id = matrix.id
    );
    Ok(matrix)
}

/// Resize a matrix
///
/// ## Errors
///
/// - `Conflict`: dimensions outside the policy, or an occupant would fall outside
/// - `NotFound`: unknown matrix
pub fn update_matrix(
    conn: &mut Connection,
    ctx: &RequestContext,
    matrix_id: MatrixId,
    max_x: i64,
    max_y: i64,
    policy: &FleetPolicy,
) -> Result<Matrix> {
    log_op_start!(
        "update_matrix",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        matrix_id,
        max_x,
        max_y
    );
    let start = Instant::now();

    let matrix = in_transaction(conn, |repo| {
        matrix_ops::update_matrix(repo, matrix_id, max_x, max_y, policy)
    })
    .map_err(|e| fail("update_matrix", ctx, e, start))?;

    log_op_end!(
        "update_matrix",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(matrix)
}

/// Delete an empty matrix
///
/// ## Errors
///
/// - `NotFound`: unknown matrix
/// - `Conflict`: drones still reference it
pub fn delete_matrix(
    conn: &mut Connection,
    ctx: &RequestContext,
    matrix_id: MatrixId,
) -> Result<()> {
    log_op_start!(
        "delete_matrix",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        matrix_id
    );
    let start = Instant::now();

    in_transaction(conn, |repo| matrix_ops::delete_matrix(repo, matrix_id))
        .map_err(|e| fail("delete_matrix", ctx, e, start))?;

    log_op_end!(
        "delete_matrix",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(())
}

pub fn get_matrix(conn: &Connection, ctx: &RequestContext, matrix_id: MatrixId) -> Result<Matrix> {
    log_op_start!(
        "get_matrix",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        matrix_id
    );
    let start = Instant::now();

    let matrix = matrix_ops::get_matrix(&SqliteFleetRepo::new(conn), matrix_id)
        .map_err(|e| fail("get_matrix", ctx, e.into(), start))?;

    log_op_end!(
        "get_matrix",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    Ok(matrix)
}

pub fn list_matrices(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Matrix>> {
    log_op_start!(
        "list_matrices",
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    let start = Instant::now();

    let matrices = matrix_ops::list_matrices(&SqliteFleetRepo::new(conn))
        .map_err(|e| fail("list_matrices", ctx, e.into(), start))?;

    log_op_end!(
        "list_matrices",
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label(),
        count = matrices.len()
    );
    Ok(matrices)
}
