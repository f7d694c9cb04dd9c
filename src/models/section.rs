use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::error::EngineError;

/// One of the two fixed-capacity seating pools: A is the premium price band,
/// B the standard one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
}

impl Section {
    pub fn prefix(self) -> char {
        match self {
            Section::A => 'A',
            Section::B => 'B',
        }
    }

    // Seat labels look like "A_5": section prefix plus the counter value at
    // allocation time.
    pub fn seat_label(self, counter: u32) -> String {
        format!("{}_{}", self.prefix(), counter)
    }

    pub fn matches_label(self, seat: &str) -> bool {
        seat.starts_with(self.prefix())
    }
}

impl FromStr for Section {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Section::A),
            "B" => Ok(Section::B),
            other => Err(EngineError::InvalidSection(other.to_string())),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
