//! Matrix command
//!
//! Usage: aeromatrix matrix <create|resize|delete|get|list>

use aeromatrix_core::MatrixId;
use aeromatrix_engine::commands::matrix;
use clap::{Args, Subcommand};

use super::session::{GlobalArgs, Session};
use super::{print_json, CliResult};

#[derive(Debug, Args)]
pub struct MatrixArgs {
    #[command(subcommand)]
    pub command: MatrixCommand,
}

#[derive(Debug, Subcommand)]
pub enum MatrixCommand {
    /// Create a matrix with inclusive bounds
    Create(DimensionArgs),
    /// Change both dimensions of a matrix
    Resize {
        matrix_id: MatrixId,
        #[command(flatten)]
        dimensions: DimensionArgs,
    },
    /// Delete an empty matrix
    Delete { matrix_id: MatrixId },
    /// Show one matrix
    Get { matrix_id: MatrixId },
    /// List all matrices
    List,
}

#[derive(Debug, Args)]
pub struct DimensionArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub max_x: i64,
    #[arg(long, allow_hyphen_values = true)]
    pub max_y: i64,
}

pub fn execute(global: &GlobalArgs, args: MatrixArgs) -> CliResult {
    let Session {
        mut conn,
        ctx,
        policy,
    } = Session::open(global)?;

    match args.command {
        MatrixCommand::Create(dim) => {
            print_json(&matrix::create_matrix(&mut conn, &ctx, dim.max_x, dim.max_y)?)
        }
        MatrixCommand::Resize {
            matrix_id,
            dimensions,
        } => print_json(&matrix::update_matrix(
            &mut conn,
            &ctx,
            matrix_id,
            dimensions.max_x,
            dimensions.max_y,
            &policy,
        )?),
        MatrixCommand::Delete { matrix_id } => {
            matrix::delete_matrix(&mut conn, &ctx, matrix_id)?;
            print_json(&serde_json::json!({ "deleted": matrix_id }))
        }
        MatrixCommand::Get { matrix_id } => {
            print_json(&matrix::get_matrix(&conn, &ctx, matrix_id)?)
        }
        MatrixCommand::List => print_json(&matrix::list_matrices(&conn, &ctx)?),
    }
}
