pub mod drone;
pub mod fly;
pub mod matrix;
pub mod session;

use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
