//! Per-session authentication state machine.
//!
//! A [`SessionContext`] is loaded at the start of a request, transitioned by
//! exactly one operation, and written back. Nothing here touches I/O; the
//! use cases in `crate::usecase` drive the store, mailer and streak tracker
//! around these transitions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::otp::OtpCode;
use crate::domain::types::{
    AuthenticatedUser, OTP_MAX_ATTEMPTS, OTP_TTL_SECS, RegisteredAccount, RoleProfile,
};
use crate::error::AuthServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub auth: AuthState,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Unauthenticated,
    OtpPending(OtpChallenge),
    Authenticated(AuthenticatedUser),
}

/// What a successful verification unlocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum PendingAction {
    Login(AuthenticatedUser),
    Register(RegisteredAccount),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    pub code: OtpCode,
    pub issued_at: DateTime<Utc>,
}

/// Live OTP challenge. `issued` is `None` after the attempts are exhausted;
/// the target and payload stay so a resend can revive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub target_email: String,
    pub pending: PendingAction,
    pub issued: Option<IssuedCode>,
    pub attempts_used: u8,
}

impl OtpChallenge {
    pub fn new(
        target_email: String,
        pending: PendingAction,
        code: OtpCode,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            target_email,
            pending,
            issued: Some(IssuedCode {
                code,
                issued_at: now,
            }),
            attempts_used: 0,
        }
    }

    /// More than [`OTP_TTL_SECS`] since issuance, or no code issued at all.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match &self.issued {
            Some(issued) => now - issued.issued_at > Duration::seconds(OTP_TTL_SECS),
            None => true,
        }
    }

    /// Whole seconds until expiry, floored at zero.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        match &self.issued {
            Some(issued) => (OTP_TTL_SECS - (now - issued.issued_at).num_seconds()).max(0),
            None => 0,
        }
    }

    pub fn attempts_left(&self) -> u8 {
        OTP_MAX_ATTEMPTS.saturating_sub(self.attempts_used)
    }

    /// Replace the code; the previous one stops matching.
    pub fn reissue(&mut self, code: OtpCode, now: DateTime<Utc>) {
        self.issued = Some(IssuedCode {
            code,
            issued_at: now,
        });
        self.attempts_used = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VerifyOutcome {
    LoggedIn(AuthenticatedUser),
    RegistrationConfirmed(RegisteredAccount),
}

/// Snapshot polled by the OTP page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpStatus {
    pub target_email: String,
    pub remaining_secs: i64,
    pub attempts_left: u8,
    pub expired: bool,
}

impl SessionContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            created_at: now,
            auth: AuthState::Unauthenticated,
            preferences: Preferences::default(),
        }
    }

    pub fn ensure_not_authenticated(&self) -> Result<(), AuthServiceError> {
        match self.auth {
            AuthState::Authenticated(_) => Err(AuthServiceError::AlreadyAuthenticated),
            _ => Ok(()),
        }
    }

    pub fn authenticated_user(&self) -> Result<&AuthenticatedUser, AuthServiceError> {
        match &self.auth {
            AuthState::Authenticated(user) => Ok(user),
            _ => Err(AuthServiceError::NotAuthenticated),
        }
    }

    pub fn pending_challenge(&self) -> Result<&OtpChallenge, AuthServiceError> {
        match &self.auth {
            AuthState::OtpPending(challenge) => Ok(challenge),
            _ => Err(AuthServiceError::NoPendingChallenge),
        }
    }

    /// Enter `OtpPending` with a freshly dispatched code. Any earlier
    /// challenge in this session is superseded.
    pub fn begin_challenge(
        &mut self,
        target_email: String,
        pending: PendingAction,
        code: OtpCode,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.ensure_not_authenticated()?;
        self.auth = AuthState::OtpPending(OtpChallenge::new(target_email, pending, code, now));
        Ok(())
    }

    /// Check a submitted code.
    ///
    /// Order: pending code present, input well-formed, not expired; only
    /// then is an attempt consumed. The third wrong code drops the code but
    /// keeps the challenge so it can be resent.
    pub fn verify_otp(
        &mut self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifyOutcome, AuthServiceError> {
        let AuthState::OtpPending(challenge) = &mut self.auth else {
            return Err(AuthServiceError::NoPendingChallenge);
        };
        let Some(issued) = &challenge.issued else {
            return Err(AuthServiceError::NoPendingChallenge);
        };
        let input = OtpCode::parse_input(input)?;
        if challenge.is_expired(now) {
            return Err(AuthServiceError::OtpExpired);
        }

        let matched = issued.code.matches(&input);
        challenge.attempts_used = challenge.attempts_used.saturating_add(1);

        if matched {
            let outcome = match challenge.pending.clone() {
                PendingAction::Login(user) => {
                    self.auth = AuthState::Authenticated(user.clone());
                    VerifyOutcome::LoggedIn(user)
                }
                PendingAction::Register(account) => {
                    self.auth = AuthState::Unauthenticated;
                    VerifyOutcome::RegistrationConfirmed(account)
                }
            };
            return Ok(outcome);
        }

        if challenge.attempts_used < OTP_MAX_ATTEMPTS {
            Err(AuthServiceError::OtpMismatch {
                attempts_left: challenge.attempts_left(),
            })
        } else {
            challenge.issued = None;
            challenge.attempts_used = 0;
            Err(AuthServiceError::OtpAttemptsExhausted)
        }
    }

    /// Swap in a newly dispatched code for the pending challenge.
    pub fn reissue_otp(&mut self, code: OtpCode, now: DateTime<Utc>) -> Result<(), AuthServiceError> {
        match &mut self.auth {
            AuthState::OtpPending(challenge) => {
                challenge.reissue(code, now);
                Ok(())
            }
            _ => Err(AuthServiceError::NoPendingChallenge),
        }
    }

    /// Abandon the pending challenge.
    pub fn cancel(&mut self) -> Result<(), AuthServiceError> {
        self.pending_challenge()?;
        self.auth = AuthState::Unauthenticated;
        Ok(())
    }

    pub fn otp_status(&self, now: DateTime<Utc>) -> Result<OtpStatus, AuthServiceError> {
        let challenge = self.pending_challenge()?;
        Ok(OtpStatus {
            target_email: challenge.target_email.clone(),
            remaining_secs: challenge.remaining_secs(now),
            attempts_left: challenge.attempts_left(),
            expired: challenge.is_expired(now),
        })
    }

    /// Record the streak on an authenticated patient identity.
    pub fn set_health_streak(&mut self, count: u32) {
        if let AuthState::Authenticated(AuthenticatedUser {
            profile: RoleProfile::Patient { health_streak, .. },
            ..
        }) = &mut self.auth
        {
            *health_streak = count;
        }
    }
}
