use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::handlers::{commit, load_session};
use crate::state::AppState;
use crate::usecase::login::{LoginInput, SubmitCredentialsUseCase};
use crate::usecase::register::{
    DoctorRegistration, PatientRegistration, RegisterDoctorUseCase, RegisterPatientUseCase,
};

// ── POST /auth/login ─────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginInput>,
) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let usecase = SubmitCredentialsUseCase {
        credentials: state.credential_store(),
        otp: state.otp_issuer(),
        clock: state.clock(),
    };
    let result = usecase
        .execute(&mut session, body)
        .await
        .map(|issued| (StatusCode::ACCEPTED, Json(issued)));

    commit(&state, &session, jar, result).await
}

// ── POST /auth/register/patient ──────────────────────────────────────────────

pub async fn register_patient(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<PatientRegistration>,
) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let usecase = RegisterPatientUseCase {
        credentials: state.credential_store(),
        otp: state.otp_issuer(),
        clock: state.clock(),
    };
    let result = usecase
        .execute(&mut session, body)
        .await
        .map(|issued| (StatusCode::CREATED, Json(issued)));

    commit(&state, &session, jar, result).await
}

// ── POST /auth/register/doctor ───────────────────────────────────────────────

pub async fn register_doctor(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<DoctorRegistration>,
) -> Response {
    let mut session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let usecase = RegisterDoctorUseCase {
        credentials: state.credential_store(),
        otp: state.otp_issuer(),
        clock: state.clock(),
    };
    let result = usecase
        .execute(&mut session, body)
        .await
        .map(|issued| (StatusCode::CREATED, Json(issued)));

    commit(&state, &session, jar, result).await
}
