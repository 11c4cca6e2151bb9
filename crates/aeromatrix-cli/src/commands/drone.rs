//! Drone command
//!
//! Usage: aeromatrix drone <create|update|delete|get|list>

use aeromatrix_core::{DroneDraft, DroneId, MatrixId, Orientation};
use aeromatrix_engine::commands::drone;
use clap::{Args, Subcommand};

use super::session::{GlobalArgs, Session};
use super::{print_json, CliResult};

#[derive(Debug, Args)]
pub struct DroneArgs {
    #[command(subcommand)]
    pub command: DroneCommand,
}

#[derive(Debug, Subcommand)]
pub enum DroneCommand {
    /// Place a new drone in a matrix
    Create(DroneFields),
    /// Overwrite every attribute of a drone
    Update {
        drone_id: DroneId,
        #[command(flatten)]
        fields: DroneFields,
    },
    /// Delete a drone
    Delete { drone_id: DroneId },
    /// Show one drone
    Get { drone_id: DroneId },
    /// List all drones
    List,
}

#[derive(Debug, Args)]
pub struct DroneFields {
    #[arg(long)]
    pub matrix: MatrixId,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub model: String,
    #[arg(long, allow_hyphen_values = true)]
    pub x: i64,
    #[arg(long, allow_hyphen_values = true)]
    pub y: i64,
    /// N, S, E or O (W is accepted for west)
    #[arg(long)]
    pub orientation: Option<String>,
}

impl DroneFields {
    fn into_draft(self) -> Result<DroneDraft, Box<dyn std::error::Error>> {
        let orientation = self
            .orientation
            .as_deref()
            .map(str::parse::<Orientation>)
            .transpose()
            .map_err(aeromatrix_core::ExError::from)?;
        Ok(DroneDraft {
            matrix_id: self.matrix,
            name: self.name,
            model: self.model,
            x: self.x,
            y: self.y,
            orientation,
        })
    }
}

pub fn execute(global: &GlobalArgs, args: DroneArgs) -> CliResult {
    let Session {
        mut conn,
        ctx,
        policy,
    } = Session::open(global)?;

    match args.command {
        DroneCommand::Create(fields) => {
            let draft = fields.into_draft()?;
            print_json(&drone::create_drone(&mut conn, &ctx, draft, &policy)?)
        }
        DroneCommand::Update { drone_id, fields } => {
            let draft = fields.into_draft()?;
            print_json(&drone::update_drone(&mut conn, &ctx, drone_id, draft, &policy)?)
        }
        DroneCommand::Delete { drone_id } => {
            print_json(&drone::delete_drone(&mut conn, &ctx, drone_id)?)
        }
        DroneCommand::Get { drone_id } => print_json(&drone::get_drone(&conn, &ctx, drone_id)?),
        DroneCommand::List => print_json(&drone::list_drones(&conn, &ctx)?),
    }
}
