use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medrec_domain::id::AccountId;
use medrec_domain::medical::{BloodGroup, Gender};
use medrec_domain::role::Role;

/// Seconds an issued OTP stays valid.
pub const OTP_TTL_SECS: i64 = 300;
/// Wrong guesses allowed per issued code.
pub const OTP_MAX_ATTEMPTS: u8 = 3;

/// Identity held by an authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: AccountId,
    pub display_name: String,
    pub email: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

/// Role-specific part of an identity. Serialized with a `role` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Patient {
        phone: Option<String>,
        blood_group: BloodGroup,
        qr_token: String,
        health_streak: u32,
    },
    Doctor {
        specialization: Option<String>,
        hospital: Option<String>,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Patient { .. } => Role::Patient,
            Self::Doctor { .. } => Role::Doctor,
        }
    }
}

impl AuthenticatedUser {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Account created by a registration, carried through its OTP step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    pub id: AccountId,
    pub email: String,
    pub display_name: String,
}

/// Stored account row together with its password material.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user: AuthenticatedUser,
    pub password_hash: String,
    pub password_salt: String,
}

/// Patient row to insert at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<f64>,
    pub qr_token: String,
}

/// Doctor row to insert at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub experience_years: Option<i32>,
}
