//! Declared mood and the ranking band it selects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mood level 1-5. Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Mood(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodBand {
    /// mood <= 2
    Low,
    /// mood == 3
    Neutral,
    /// mood >= 4
    High,
}

impl Mood {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::MoodOutOfRange { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> MoodBand {
        match self.0 {
            1..=2 => MoodBand::Low,
            3 => MoodBand::Neutral,
            _ => MoodBand::High,
        }
    }
}

impl TryFrom<i64> for Mood {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mood> for u8 {
    fn from(m: Mood) -> Self {
        m.0
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("mood must be an integer 1-5, got '{s}'"))?;
        Self::new(n).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
