use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use medrec_core::clock::Clock;

use crate::handlers::{commit, load_session};
use crate::state::AppState;
use crate::usecase::otp::{ResendOtpUseCase, VerifyOtpUseCase};

// ── GET /auth/otp ────────────────────────────────────────────────────────────

pub async fn otp_status(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };
    match session.otp_status(state.clock().now()) {
        Ok(status) => Json(status).into_response(),
        Err(e) => e.into_response(),
    }
}

// ── POST /auth/otp ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtpRequest>,
) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let usecase = VerifyOtpUseCase {
        streaks: state.streak_tracker(),
        clock: state.clock(),
    };
    let result = usecase.execute(&mut session, &body.code).await.map(Json);

    commit(&state, &session, jar, result).await
}

// ── PATCH /auth/otp ──────────────────────────────────────────────────────────

pub async fn resend_otp(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let usecase = ResendOtpUseCase {
        otp: state.otp_issuer(),
        clock: state.clock(),
    };
    let result = usecase
        .execute(&mut session)
        .await
        .map(|issued| (StatusCode::ACCEPTED, Json(issued)));

    commit(&state, &session, jar, result).await
}

// ── DELETE /auth/otp ─────────────────────────────────────────────────────────

pub async fn cancel_otp(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };
    let result = session.cancel().map(|()| StatusCode::NO_CONTENT);
    commit(&state, &session, jar, result).await
}
