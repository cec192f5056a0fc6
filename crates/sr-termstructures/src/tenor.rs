//! Money-market index tenors.

use std::fmt;
use std::str::FromStr;

use sr_core::{Error, Result};

/// Tenor of a money-market index fixing.
///
/// Only the tenors the calibration pipeline actually quotes are
/// representable; anything else is rejected at parse time rather than
/// carried around as a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexTenor {
    /// One month.
    M1,
    /// Three months.
    M3,
    /// Six months.
    M6,
}

impl IndexTenor {
    /// Length of the tenor in calendar months.
    pub fn months(self) -> u32 {
        match self {
            IndexTenor::M1 => 1,
            IndexTenor::M3 => 3,
            IndexTenor::M6 => 6,
        }
    }

    /// Canonical text form, the same one `FromStr` accepts.
    pub fn as_str(self) -> &'static str {
        match self {
            IndexTenor::M1 => "1M",
            IndexTenor::M3 => "3M",
            IndexTenor::M6 => "6M",
        }
    }
}

impl fmt::Display for IndexTenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexTenor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1M" => Ok(IndexTenor::M1),
            "3M" => Ok(IndexTenor::M3),
            "6M" => Ok(IndexTenor::M6),
            other => Err(Error::UnknownTenor(other.to_string())),
        }
    }
}
