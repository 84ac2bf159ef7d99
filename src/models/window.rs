//! Regions and daily activity windows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server region a match is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Na,
    Eu,
}

impl Region {
    /// Infer the region from an upstream match id such as `"1-4"` (NA) or `"2-1"` (EU).
    pub fn from_match_id(match_id: &str) -> Option<Self> {
        match match_id.trim().split('-').next()? {
            "1" => Some(Region::Na),
            "2" => Some(Region::Eu),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Na => write!(f, "na"),
            Region::Eu => write!(f, "eu"),
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" => Ok(Region::Na),
            "eu" => Ok(Region::Eu),
            other => Err(format!("unknown region '{}' (expected na or eu)", other)),
        }
    }
}

/// Recurring daily period used to bucket skirmish history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    NaPrime,
    EuPrime,
    Ocx,
    OffHours,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::NaPrime,
        TimeWindow::EuPrime,
        TimeWindow::Ocx,
        TimeWindow::OffHours,
    ];
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::NaPrime => write!(f, "naPrime"),
            TimeWindow::EuPrime => write!(f, "euPrime"),
            TimeWindow::Ocx => write!(f, "ocx"),
            TimeWindow::OffHours => write!(f, "offHours"),
        }
    }
}
