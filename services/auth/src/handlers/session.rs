use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use medrec_auth_types::cookie::{clear_session_cookie, session_id};
use medrec_auth_types::identity::IdentityHeaders;

use crate::domain::repository::SessionStore;
use crate::domain::session::Preferences;
use crate::domain::types::AuthenticatedUser;
use crate::error::AuthServiceError;
use crate::handlers::{commit, load_session};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: AuthenticatedUser,
    pub preferences: Preferences,
}

// ── GET /auth/session ────────────────────────────────────────────────────────

/// Current identity. The gateway copies the `x-medrec-user-*` headers from
/// this response onto the requests it forwards.
pub async fn current_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let session = load_session(&state, &jar).await?;
    let user = session.authenticated_user()?.clone();

    let headers = IdentityHeaders {
        user_id: user.id.clone(),
        role: user.role(),
    }
    .to_headers();

    Ok((
        StatusCode::OK,
        headers,
        Json(SessionResponse {
            user,
            preferences: session.preferences,
        }),
    ))
}

// ── PATCH /auth/session/preferences ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePreferencesRequest {
    pub dark_mode: Option<bool>,
}

pub async fn update_preferences(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<UpdatePreferencesRequest>,
) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };
    if let Some(dark_mode) = body.dark_mode {
        session.preferences.dark_mode = dark_mode;
    }
    let preferences = session.preferences.clone();
    commit(&state, &session, jar, Ok(Json(preferences))).await
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    if let Some(id) = session_id(&jar) {
        state.session_store().delete(&id).await?;
    }
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
