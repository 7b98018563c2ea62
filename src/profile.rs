//! User profile
//!
//! Read-only subject data stamped into the header row of every log file:
//! gender and resting heart rate. Loadable from a small TOML file so a
//! recording rig can be reconfigured without rebuilding.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WearlogError};

/// Gender as the log format knows it: a single flag byte in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[default]
    Other,
}

impl Gender {
    /// Header-row flag byte: 1 = male, 0 = anything else.
    pub fn flag(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Other => 0,
        }
    }

    /// Inverse of [`flag`](Self::flag); any byte other than 1 maps to `Other`.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 1 {
            Gender::Male
        } else {
            Gender::Other
        }
    }
}

/// Profile fields the recorder reads at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Subject gender, written into header byte 4
    #[serde(default)]
    pub gender: Gender,

    /// Resting heart rate in bpm; absent on devices that have not measured
    /// one yet, encoded as 0 in the header
    #[serde(default)]
    pub resting_heart_rate: Option<u8>,
}

impl UserProfile {
    /// Load a profile from a TOML file.
    ///
    /// A missing file is a configuration error here (unlike the log file,
    /// the profile is user-provided input).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WearlogError::Config(format!("cannot read profile {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            WearlogError::Config(format!("cannot parse profile {}: {}", path.display(), e))
        })
    }

    /// Resting heart rate with the header-row encoding applied (0 = unknown)
    pub fn resting_heart_rate_or_zero(&self) -> u8 {
        self.resting_heart_rate.unwrap_or(0)
    }
}
