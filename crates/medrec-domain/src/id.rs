//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// Identifies a patient or doctor account, e.g. `PAT1A2B3C4D` or `DOC9F00E1A2`.
///
/// The prefix encodes the role; the tail is 8 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid account id: {0}")]
pub struct InvalidAccountId(pub String);

impl AccountId {
    /// Issue a fresh identifier for a new account of `role`.
    pub fn generate(role: Role) -> Self {
        let tail = Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase();
        Self(format!("{}{}", role.id_prefix(), tail))
    }

    /// Role encoded in the identifier prefix.
    pub fn role(&self) -> Role {
        if self.0.starts_with(Role::Doctor.id_prefix()) {
            Role::Doctor
        } else {
            Role::Patient
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = InvalidAccountId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = [Role::Patient, Role::Doctor]
            .iter()
            .any(|role| s.len() > 3 && s.starts_with(role.id_prefix()))
            && s.chars().all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidAccountId(s.to_owned()))
        }
    }
}

/// Identifies a medical record row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Opaque token printed on a patient's emergency QR card.
pub fn generate_qr_token() -> String {
    Uuid::new_v4().simple().to_string()
}
