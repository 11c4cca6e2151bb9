use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FleetError;

/// Cardinal heading of a drone
///
/// Rotations are total: `turn_left` cycles N → W → S → E → N and
/// `turn_right` runs the same cycle backwards.
///
/// Serialized with the persisted single-letter tokens (`N`, `S`, `E`, `O`);
/// West is stored as `O` and `W` is accepted as an alias on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "O", alias = "W")]
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    pub fn turn_left(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Unit step `(dx, dy)` taken by `MOVE_FORWARD` in this heading
    pub fn step(self) -> (i64, i64) {
        match self {
            Orientation::North => (0, 1),
            Orientation::South => (0, -1),
            Orientation::East => (1, 0),
            Orientation::West => (-1, 0),
        }
    }

    /// Persisted token for this heading
    pub fn as_token(self) -> &'static str {
        match self {
            Orientation::North => "N",
            Orientation::South => "S",
            Orientation::East => "E",
            Orientation::West => "O",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for Orientation {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Orientation::North),
            "S" => Ok(Orientation::South),
            "E" => Ok(Orientation::East),
            "O" | "W" => Ok(Orientation::West),
            other => Err(FleetError::InvalidOrientation {
                token: other.to_string(),
            }),
        }
    }
}
