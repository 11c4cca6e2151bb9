//! Command orchestration layer
//!
//! ## Logging Ownership
//!
//! Every public function here emits `log_op_start!` on entry and either
//! `log_op_end!` or `log_op_error!` on exit, tagged with the request id and
//! actor from the caller's `RequestContext`. Core and store only use
//! `tracing::debug!`.

pub mod drone;
pub mod engine_command;
pub mod flight;
pub mod matrix;

use std::time::Instant;

use aeromatrix_core::errors::ExError;
use aeromatrix_core::log_op_error;
use aeromatrix_core_types::RequestContext;
use aeromatrix_store::errors::from_rusqlite;
use aeromatrix_store::{Result, SqliteFleetRepo};
use rusqlite::{Connection, TransactionBehavior};

/// Run `work` inside one IMMEDIATE transaction
///
/// The write lock is taken before any validation read. The transaction
/// commits only if `work` succeeds and rolls back on drop otherwise.
pub(crate) fn in_transaction<T, F>(conn: &mut Connection, work: F) -> Result<T>
where
    F: FnOnce(&mut SqliteFleetRepo<'_>) -> aeromatrix_core::Result<T>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;
    let value = {
        let mut repo = SqliteFleetRepo::new(&tx);
        work(&mut repo)?
    };
    tx.commit().map_err(from_rusqlite)?;
    Ok(value)
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Log a failed operation and attach the operation name and request id
pub(crate) fn fail(
    op: &'static str,
    ctx: &RequestContext,
    err: ExError,
    start: Instant,
) -> ExError {
    log_op_error!(
        op,
        err.clone(),
        duration_ms = elapsed_ms(start),
        request_id = ctx.request_id.as_str(),
        actor = ctx.actor_label()
    );
    err.with_op(op).with_request_id(ctx.request_id.clone())
}
