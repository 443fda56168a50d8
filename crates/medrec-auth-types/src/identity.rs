//! Gateway-forwarded identity headers.
//!
//! The auth service answers `GET /auth/session` with these headers for an
//! authenticated session; the gateway copies them onto requests it forwards
//! to other services, which read them back with [`IdentityHeaders`].

use axum::extract::FromRequestParts;
use http::request::Parts;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use medrec_domain::id::AccountId;
use medrec_domain::role::Role;

pub const X_MEDREC_USER_ID: &str = "x-medrec-user-id";
pub const X_MEDREC_USER_ROLE: &str = "x-medrec-user-role";

/// Authenticated caller as forwarded by the gateway.
///
/// Extraction fails with 401 if either header is absent or unparseable.
/// Role checks (403) are done by handlers via [`IdentityHeaders::require`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: AccountId,
    pub role: Role,
}

impl IdentityHeaders {
    /// Fail with 403 unless the caller has `role`.
    pub fn require(&self, role: Role) -> Result<(), StatusCode> {
        if self.role == role {
            Ok(())
        } else {
            Err(StatusCode::FORBIDDEN)
        }
    }

    /// Header map carrying this identity.
    pub fn to_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        // Account ids are ASCII alphanumerics, role names are fixed ASCII.
        if let Ok(v) = HeaderValue::from_str(self.user_id.as_str()) {
            map.insert(HeaderName::from_static(X_MEDREC_USER_ID), v);
        }
        map.insert(
            HeaderName::from_static(X_MEDREC_USER_ROLE),
            HeaderValue::from_static(self.role.as_str()),
        );
        map
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously so the returned future borrows nothing
    // from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_MEDREC_USER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<AccountId>().ok());

        let role = parts
            .headers
            .get(X_MEDREC_USER_ROLE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Role>().ok());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, role })
        }
    }
}
