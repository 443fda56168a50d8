use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use medrec_core::error::{ServiceError, json_error_response};

/// Records service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecordsServiceError {
    #[error("patient not found")]
    PatientNotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("missing data")]
    MissingData,
    #[error("start date is after end date")]
    InvalidDateRange,
    #[error("{0}")]
    InvalidTemplate(String),
    #[error("records store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError for RecordsServiceError {
    fn kind(&self) -> &'static str {
        match self {
            Self::PatientNotFound => "PATIENT_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::InvalidTemplate(_) => "INVALID_TEMPLATE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::PatientNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MissingData | Self::InvalidDateRange | Self::InvalidTemplate(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecordsServiceError {
    fn into_response(self) -> Response {
        json_error_response(&self)
    }
}

pub trait DbResultExt<T> {
    fn store_context(self, what: &'static str) -> Result<T, RecordsServiceError>;
}

impl<T> DbResultExt<T> for Result<T, sea_orm::DbErr> {
    fn store_context(self, what: &'static str) -> Result<T, RecordsServiceError> {
        self.map_err(|e| match e {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                RecordsServiceError::StoreUnavailable(anyhow::Error::new(e).context(what))
            }
            other => RecordsServiceError::Internal(anyhow::Error::new(other).context(what)),
        })
    }
}
