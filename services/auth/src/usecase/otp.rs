use serde::Serialize;

use medrec_core::clock::Clock;
use medrec_domain::id::AccountId;
use medrec_domain::role::Role;

use crate::domain::repository::{OtpMailer, StreakRepository};
use crate::domain::session::{SessionContext, VerifyOutcome};
use crate::domain::types::{AuthenticatedUser, OTP_TTL_SECS};
use crate::error::AuthServiceError;
use crate::usecase::issuer::OtpIssuer;
use crate::usecase::login::OtpIssued;
use crate::usecase::streak::HealthStreakTracker;

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOtpOutput {
    LoggedIn {
        user: AuthenticatedUser,
        message: String,
        /// Present for patients whose streak is above zero.
        streak_notice: Option<String>,
    },
    RegistrationConfirmed {
        account_id: AccountId,
        message: String,
    },
}

pub struct VerifyOtpUseCase<S, K>
where
    S: StreakRepository,
    K: Clock,
{
    pub streaks: HealthStreakTracker<S>,
    pub clock: K,
}

impl<S, K> VerifyOtpUseCase<S, K>
where
    S: StreakRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        session: &mut SessionContext,
        code: &str,
    ) -> Result<VerifyOtpOutput, AuthServiceError> {
        match session.verify_otp(code, self.clock.now())? {
            VerifyOutcome::LoggedIn(user) => {
                let mut streak_notice = None;
                if user.role() == Role::Patient {
                    let streak = self.patient_streak(&user.id).await;
                    session.set_health_streak(streak);
                    if streak > 0 {
                        streak_notice =
                            Some(format!("🔥 Health Streak: {streak} days! Keep it up!"));
                    }
                }
                let user = session.authenticated_user()?.clone();
                tracing::info!(user_id = %user.id, "session authenticated");
                Ok(VerifyOtpOutput::LoggedIn {
                    message: format!("Welcome back, {}!", user.display_name),
                    user,
                    streak_notice,
                })
            }
            VerifyOutcome::RegistrationConfirmed(account) => {
                tracing::info!(account_id = %account.id, "registration confirmed");
                Ok(VerifyOtpOutput::RegistrationConfirmed {
                    account_id: account.id,
                    message: "Registration successful! You can now log in.".to_owned(),
                })
            }
        }
    }

    // A streak failure never blocks the login.
    async fn patient_streak(&self, patient_id: &AccountId) -> u32 {
        match self
            .streaks
            .record_login(patient_id, self.clock.today())
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(%patient_id, error = %e, "health streak update failed");
                0
            }
        }
    }
}

pub struct ResendOtpUseCase<M, K>
where
    M: OtpMailer,
    K: Clock,
{
    pub otp: OtpIssuer<M>,
    pub clock: K,
}

impl<M, K> ResendOtpUseCase<M, K>
where
    M: OtpMailer,
    K: Clock,
{
    /// Dispatch a fresh code; the session keeps the old one if sending fails.
    pub async fn execute(&self, session: &mut SessionContext) -> Result<OtpIssued, AuthServiceError> {
        let target_email = session.pending_challenge()?.target_email.clone();
        let code = self.otp.issue(&target_email).await?;
        session.reissue_otp(code, self.clock.now())?;
        Ok(OtpIssued {
            target_email,
            expires_in_secs: OTP_TTL_SECS,
        })
    }
}
