use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use medrec_core::error::{ServiceError, json_error_response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("credential store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("failed to send OTP: {0}")]
    OtpDispatchFailed(String),
    #[error("OTP must be exactly 6 digits")]
    OtpMalformed,
    #[error("OTP expired, request a new one")]
    OtpExpired,
    #[error("incorrect OTP, {} left", attempts_phrase(.attempts_left))]
    OtpMismatch { attempts_left: u8 },
    #[error("too many failed attempts, request a new OTP")]
    OtpAttemptsExhausted,
    #[error("no OTP challenge pending")]
    NoPendingChallenge,
    #[error("already logged in")]
    AlreadyAuthenticated,
    #[error("not logged in")]
    NotAuthenticated,
    #[error("an account with this email already exists")]
    AccountAlreadyExists,
    #[error("{0}")]
    InvalidRegistration(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

fn attempts_phrase(n: &u8) -> String {
    if *n == 1 {
        "1 attempt".to_owned()
    } else {
        format!("{n} attempts")
    }
}

impl ServiceError for AuthServiceError {
    fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::OtpDispatchFailed(_) => "OTP_DISPATCH_FAILED",
            Self::OtpMalformed => "OTP_MALFORMED",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch { .. } => "OTP_MISMATCH",
            Self::OtpAttemptsExhausted => "OTP_ATTEMPTS_EXHAUSTED",
            Self::NoPendingChallenge => "NO_PENDING_CHALLENGE",
            Self::AlreadyAuthenticated => "ALREADY_AUTHENTICATED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::AccountAlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::InvalidRegistration(_) => "INVALID_REGISTRATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::OtpMalformed | Self::InvalidRegistration(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::OtpExpired
            | Self::OtpMismatch { .. }
            | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NoPendingChallenge
            | Self::AlreadyAuthenticated
            | Self::AccountAlreadyExists => StatusCode::CONFLICT,
            Self::OtpAttemptsExhausted => StatusCode::TOO_MANY_REQUESTS,
            Self::OtpDispatchFailed(_) => StatusCode::BAD_GATEWAY,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn extra_fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Self::OtpMismatch { attempts_left } = self {
            map.insert("attempts_left".to_owned(), Value::from(*attempts_left));
        }
        map
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        json_error_response(&self)
    }
}

/// Classify a sea-orm failure: lost connections are `StoreUnavailable`,
/// everything else is `Internal`.
pub fn db_error(e: sea_orm::DbErr, what: &'static str) -> AuthServiceError {
    match e {
        sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
            AuthServiceError::StoreUnavailable(anyhow::Error::new(e).context(what))
        }
        other => AuthServiceError::Internal(anyhow::Error::new(other).context(what)),
    }
}

pub trait DbResultExt<T> {
    fn store_context(self, what: &'static str) -> Result<T, AuthServiceError>;
}

impl<T> DbResultExt<T> for Result<T, sea_orm::DbErr> {
    fn store_context(self, what: &'static str) -> Result<T, AuthServiceError> {
        self.map_err(|e| db_error(e, what))
    }
}
