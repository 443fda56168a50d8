//! Account role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two kinds of account that can sign in.
///
/// Wire format: lowercase string (`"patient"`, `"doctor"`). The same string is
/// forwarded by the gateway in `x-medrec-user-role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }

    /// Prefix of account identifiers issued for this role.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Patient => "PAT",
            Self::Doctor => "DOC",
        }
    }

    /// How an account of this role is addressed: `"First Last"` for
    /// patients, `"Dr. First Last"` for doctors.
    pub fn display_name(self, first_name: &str, last_name: &str) -> String {
        match self {
            Self::Patient => format!("{first_name} {last_name}"),
            Self::Doctor => format!("Dr. {first_name} {last_name}"),
        }
    }

    /// Human-facing label. Presentation only; never parse this back.
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "👤 Patient",
            Self::Doctor => "👨‍⚕️ Doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
