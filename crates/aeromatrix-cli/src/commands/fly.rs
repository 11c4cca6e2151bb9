//! Fly command
//!
//! Usage:
//!   aeromatrix fly execute <DRONE_ID> <COMMAND>...
//!   aeromatrix fly sequence --drones 1,2 <COMMAND>...
//!   aeromatrix fly batch <FILE>

use std::path::PathBuf;

use aeromatrix_core::{BatchItem, DroneId, ExError, FleetError};
use aeromatrix_engine::commands::{drone, flight};
use clap::{Args, Subcommand};

use super::session::{GlobalArgs, Session};
use super::{print_json, CliResult};

#[derive(Debug, Args)]
pub struct FlyArgs {
    #[command(subcommand)]
    pub command: FlyCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlyCommand {
    /// Run a command list against one drone
    Execute {
        drone_id: DroneId,
        /// TURN_LEFT, TURN_RIGHT or MOVE_FORWARD
        commands: Vec<String>,
    },
    /// Run the same command list against several drones in order
    Sequence {
        #[arg(long, value_delimiter = ',', required = true)]
        drones: Vec<DroneId>,
        commands: Vec<String>,
    },
    /// Run a JSON batch: [{"drone_id": 1, "commands": ["MOVE_FORWARD"]}]
    Batch { file: PathBuf },
}

pub fn execute(global: &GlobalArgs, args: FlyArgs) -> CliResult {
    let Session { mut conn, ctx, .. } = Session::open(global)?;

    match args.command {
        FlyCommand::Execute { drone_id, commands } => {
            print_json(&flight::execute(&mut conn, &ctx, drone_id, &commands)?)
        }
        FlyCommand::Sequence { drones, commands } => {
            flight::execute_in_sequence(&mut conn, &ctx, &drones, &commands)?;
            let flown = drones
                .iter()
                .map(|id| drone::get_drone(&conn, &ctx, *id))
                .collect::<Result<Vec<_>, _>>()?;
            print_json(&flown)
        }
        FlyCommand::Batch { file } => {
            let contents = std::fs::read_to_string(&file)
                .map_err(|e| ExError::from(FleetError::from(e)))?;
            let items: Vec<BatchItem> = serde_json::from_str(&contents)
                .map_err(|e| ExError::from(FleetError::from(e)))?;
            flight::execute_batch(&mut conn, &ctx, &items)?;
            let flown = items
                .iter()
                .map(|item| drone::get_drone(&conn, &ctx, item.drone_id))
                .collect::<Result<Vec<_>, _>>()?;
            print_json(&flown)
        }
    }
}
