//! AeroMatrix CLI
//!
//! Command-line interface for the drone fleet engine

use aeromatrix_core::ExError;
use clap::{Parser, Subcommand};

mod commands;

use commands::session::GlobalArgs;

#[derive(Debug, Parser)]
#[command(name = "aeromatrix")]
#[command(about = "AeroMatrix - drone flight command execution", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Matrix lifecycle
    Matrix(commands::matrix::MatrixArgs),
    /// Drone lifecycle
    Drone(commands::drone::DroneArgs),
    /// Flight command execution
    Fly(commands::fly::FlyArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Matrix(args) => commands::matrix::execute(&cli.global, args),
        Commands::Drone(args) => commands::drone::execute(&cli.global, args),
        Commands::Fly(args) => commands::fly::execute(&cli.global, args),
    };

    if let Err(e) = result {
        match e.downcast_ref::<ExError>() {
            Some(ex) => eprintln!("Error: [{}] {}", ex.code(), ex.message()),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
