use serde::{Deserialize, Serialize};

use medrec_core::clock::Clock;
use medrec_domain::role::Role;

use crate::domain::password::verify_password;
use crate::domain::repository::{CredentialStore, OtpMailer};
use crate::domain::session::{PendingAction, SessionContext};
use crate::domain::types::OTP_TTL_SECS;
use crate::error::AuthServiceError;
use crate::usecase::issuer::OtpIssuer;

#[derive(Deserialize)]
pub struct LoginInput {
    pub role: Role,
    /// Account id (`PAT…`/`DOC…`) or email.
    pub identifier: String,
    pub password: String,
}

/// Tells the client where the code went and how long it is good for.
#[derive(Debug, Serialize)]
pub struct OtpIssued {
    pub target_email: String,
    pub expires_in_secs: i64,
}

pub struct SubmitCredentialsUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub credentials: C,
    pub otp: OtpIssuer<M>,
    pub clock: K,
}

impl<C, M, K> SubmitCredentialsUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub async fn execute(
        &self,
        session: &mut SessionContext,
        input: LoginInput,
    ) -> Result<OtpIssued, AuthServiceError> {
        session.ensure_not_authenticated()?;

        let identifier = input.identifier.trim();
        if identifier.is_empty() || input.password.is_empty() {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Unknown account and wrong password are indistinguishable to the caller.
        let stored = self
            .credentials
            .find_by_identifier(input.role, identifier)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &stored.password_salt, &stored.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let target_email = stored.user.email.clone();
        let code = self.otp.issue(&target_email).await?;
        tracing::info!(user_id = %stored.user.id, role = %input.role, "login OTP issued");

        session.begin_challenge(
            target_email.clone(),
            PendingAction::Login(stored.user),
            code,
            self.clock.now(),
        )?;

        Ok(OtpIssued {
            target_email,
            expires_in_secs: OTP_TTL_SECS,
        })
    }
}
