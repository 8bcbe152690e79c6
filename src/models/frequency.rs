//! Defines how often a recurring transaction repeats.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Error;

/// How often a recurring transaction happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every calendar day.
    Daily,
    /// Every week on a fixed weekday.
    Weekly,
    /// Every calendar month on a fixed day of the month.
    ///
    /// The day is clamped to the length of shorter months, e.g. day 31
    /// becomes the 28th (or 29th) in February.
    Monthly,
    /// Every year on a fixed month and day of the month, with the same
    /// clamping as [Frequency::Monthly].
    Yearly,
}

impl Frequency {
    /// The integer code the frequency is stored as in the database.
    pub fn as_i64(self) -> i64 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::Monthly => 2,
            Frequency::Yearly => 3,
        }
    }
}

impl TryFrom<i64> for Frequency {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Frequency::Daily),
            1 => Ok(Frequency::Weekly),
            2 => Ok(Frequency::Monthly),
            3 => Ok(Frequency::Yearly),
            _ => Err(Error::InvalidFrequency(value)),
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };

        write!(f, "{name}")
    }
}
