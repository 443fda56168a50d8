pub mod login;
pub mod otp;
pub mod session;

use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use medrec_auth_types::cookie::{session_id, set_session_cookie};
use medrec_core::clock::Clock;

use crate::domain::repository::SessionStore;
use crate::domain::session::SessionContext;
use crate::error::AuthServiceError;
use crate::state::AppState;

/// The caller's session context; a fresh one when the cookie is missing or
/// its context has expired.
pub(crate) async fn load_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<SessionContext, AuthServiceError> {
    if let Some(id) = session_id(jar) {
        if let Some(session) = state.session_store().load(&id).await? {
            return Ok(session);
        }
    }
    Ok(SessionContext::new(state.clock().now()))
}

/// Write the context back and refresh the cookie, then render `result`.
///
/// Failed operations are committed too: a wrong OTP has consumed an attempt.
pub(crate) async fn commit<T>(
    state: &AppState,
    session: &SessionContext,
    jar: CookieJar,
    result: Result<T, AuthServiceError>,
) -> Response
where
    T: IntoResponse,
{
    if let Err(e) = state.session_store().save(session).await {
        return e.into_response();
    }
    let jar = set_session_cookie(
        jar,
        session.id.clone(),
        state.cookie_domain.clone(),
        state.session_ttl_secs,
    );
    match result {
        Ok(body) => (jar, body).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}
