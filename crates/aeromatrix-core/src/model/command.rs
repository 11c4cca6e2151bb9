use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{FleetError, Result};

/// A single flight directive
///
/// Tokens are case-sensitive and must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "TURN_LEFT")]
    TurnLeft,
    #[serde(rename = "TURN_RIGHT")]
    TurnRight,
    #[serde(rename = "MOVE_FORWARD")]
    MoveForward,
}

impl Command {
    pub fn as_token(self) -> &'static str {
        match self {
            Command::TurnLeft => "TURN_LEFT",
            Command::TurnRight => "TURN_RIGHT",
            Command::MoveForward => "MOVE_FORWARD",
        }
    }

    /// Parse one token; an absent token is reported as `null`
    ///
    /// # Errors
    /// `UnsupportedCommand` for anything but the three recognised tokens.
    pub fn from_token(token: Option<&str>) -> Result<Self> {
        match token {
            Some("TURN_LEFT") => Ok(Command::TurnLeft),
            Some("TURN_RIGHT") => Ok(Command::TurnRight),
            Some("MOVE_FORWARD") => Ok(Command::MoveForward),
            Some(other) => Err(FleetError::UnsupportedCommand {
                token: Some(other.to_string()),
            }),
            None => Err(FleetError::UnsupportedCommand { token: None }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for Command {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        Command::from_token(Some(s))
    }
}

/// An entry of a command list, resolved only when execution reaches it
///
/// Raw tokens from a request stay unparsed until their turn, so a bad token
/// after a failing move never hides the move's error.
pub trait CommandToken {
    /// # Errors
    /// `UnsupportedCommand` for an unrecognised or absent token.
    fn resolve(&self) -> Result<Command>;
}

impl CommandToken for Command {
    fn resolve(&self) -> Result<Command> {
        Ok(*self)
    }
}

impl CommandToken for String {
    fn resolve(&self) -> Result<Command> {
        Command::from_token(Some(self))
    }
}

impl CommandToken for &str {
    fn resolve(&self) -> Result<Command> {
        Command::from_token(Some(self))
    }
}

impl<T: CommandToken> CommandToken for Option<T> {
    fn resolve(&self) -> Result<Command> {
        match self {
            Some(token) => token.resolve(),
            None => Command::from_token(None),
        }
    }
}
