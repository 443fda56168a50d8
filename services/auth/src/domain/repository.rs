#![allow(async_fn_in_trait)]

use medrec_domain::id::AccountId;
use medrec_domain::role::Role;
use medrec_domain::streak::HealthStreak;

use crate::domain::otp::OtpMessage;
use crate::domain::session::SessionContext;
use crate::domain::types::{NewDoctor, NewPatient, StoredCredential};
use crate::error::AuthServiceError;

/// Patient and doctor accounts.
pub trait CredentialStore: Send + Sync {
    /// Find an account of `role` whose id or email equals `identifier`.
    async fn find_by_identifier(
        &self,
        role: Role,
        identifier: &str,
    ) -> Result<Option<StoredCredential>, AuthServiceError>;

    /// Insert a patient. Duplicate email → `AccountAlreadyExists`.
    async fn create_patient(&self, patient: &NewPatient) -> Result<(), AuthServiceError>;

    /// Insert a doctor. Duplicate email → `AccountAlreadyExists`.
    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<(), AuthServiceError>;
}

/// Streak columns of the patient row.
pub trait StreakRepository: Send + Sync {
    /// `None` when the patient row does not exist.
    async fn get(&self, patient_id: &AccountId) -> Result<Option<HealthStreak>, AuthServiceError>;

    async fn save(
        &self,
        patient_id: &AccountId,
        streak: &HealthStreak,
    ) -> Result<(), AuthServiceError>;
}

/// Outbound transport for OTP emails.
pub trait OtpMailer: Send + Sync {
    async fn send(&self, message: &OtpMessage) -> Result<(), AuthServiceError>;
}

/// Session contexts keyed by the opaque cookie id.
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<SessionContext>, AuthServiceError>;

    /// Write the context back and refresh its TTL.
    async fn save(&self, session: &SessionContext) -> Result<(), AuthServiceError>;

    async fn delete(&self, session_id: &str) -> Result<(), AuthServiceError>;
}
