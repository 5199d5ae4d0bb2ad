//! Line direction type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {input:?} (expected \"A\" or \"R\")")]
pub struct InvalidDirection {
    input: String,
}

/// One of the two traversal variants of a line.
///
/// The network publishes every physical line twice, once per direction,
/// with the same totem code. `Outbound` is coded `"A"` (aller) and
/// `Return` is coded `"R"` (retour).
///
/// # Examples
///
/// ```
/// use totem_board::domain::Direction;
///
/// assert_eq!(Direction::parse("A").unwrap(), Direction::Outbound);
/// assert_eq!(Direction::Return.code(), "R");
///
/// // Anything else is rejected
/// assert!(Direction::parse("X").is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "A")]
    Outbound,
    #[serde(rename = "R")]
    Return,
}

impl Direction {
    /// Both variants, outbound first.
    pub const ALL: [Direction; 2] = [Direction::Outbound, Direction::Return];

    /// Parse a direction from its one-letter code.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s {
            "A" => Ok(Direction::Outbound),
            "R" => Ok(Direction::Return),
            _ => Err(InvalidDirection {
                input: s.to_string(),
            }),
        }
    }

    /// Returns the one-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Outbound => "A",
            Direction::Return => "R",
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse(s)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Direction({})", self.code())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
