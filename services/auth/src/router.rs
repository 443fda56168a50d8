use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};

use medrec_core::health::{database_ready, healthz};
use medrec_core::middleware::with_http_layers;

use crate::handlers::{
    login::{login, register_doctor, register_patient},
    otp::{cancel_otp, otp_status, resend_otp, verify_otp},
    session::{current_session, logout, update_preferences},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Credentials
        .route("/auth/login", post(login))
        .route("/auth/register/patient", post(register_patient))
        .route("/auth/register/doctor", post(register_doctor))
        // OTP challenge
        .route(
            "/auth/otp",
            get(otp_status)
                .post(verify_otp)
                .patch(resend_otp)
                .delete(cancel_otp),
        )
        // Session
        .route("/auth/session", get(current_session).delete(logout))
        .route("/auth/session/preferences", patch(update_preferences))
        .with_state(state);
    with_http_layers(router)
}
