use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use medrec_core::health::{database_ready, healthz};
use medrec_core::middleware::with_http_layers;

use crate::handlers::{
    allergy::{add_allergy, get_own_allergies},
    directory::{search_doctors, search_patients},
    emergency::get_emergency_card,
    records::{
        add_record, add_record_batch, add_record_batch_csv, get_batch_template, get_own_records,
        get_own_vitals, get_patient_chart,
    },
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
        // Records
        .route("/records", post(add_record))
        .route("/records/batch", post(add_record_batch))
        .route("/records/batch/csv", post(add_record_batch_csv))
        .route("/records/batch/template", get(get_batch_template))
        .route("/records/@me", get(get_own_records))
        .route("/records/@me/vitals", get(get_own_vitals))
        .route("/records/patients/{id}", get(get_patient_chart))
        // Allergies
        .route("/allergies", post(add_allergy))
        .route("/allergies/@me", get(get_own_allergies))
        // Directory
        .route("/patients", get(search_patients))
        .route("/doctors", get(search_doctors))
        // Public
        .route("/emergency/{qr_token}", get(get_emergency_card))
        .with_state(state);
    with_http_layers(router)
}
