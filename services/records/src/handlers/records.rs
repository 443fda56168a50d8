use axum::{
    Json,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{StatusCode, header},
};
use serde::{Deserialize, Serialize};

use medrec_auth_types::identity::IdentityHeaders;
use medrec_domain::id::{AccountId, RecordId};
use medrec_domain::role::Role;

use crate::domain::types::{BatchSummary, DateRange, MedicalRecordEntry, PatientChart, VitalPoint};
use crate::error::RecordsServiceError;
use crate::handlers::{parse_query, require};
use crate::state::AppState;
use crate::usecase::records::{
    AddRecordBatchUseCase, AddRecordInput, AddRecordUseCase, BatchRecordRow,
    GetOwnRecordsUseCase, GetPatientChartUseCase, GetVitalTrendUseCase,
};
use crate::usecase::template::{BATCH_TEMPLATE_CSV, BATCH_TEMPLATE_FILENAME, parse_batch_csv};

// ── GET /records/@me ─────────────────────────────────────────────────────────

pub async fn get_own_records(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<MedicalRecordEntry>>, RecordsServiceError> {
    require(&identity, Role::Patient)?;
    let range: DateRange = parse_query(raw_query.as_deref())?;

    let uc = GetOwnRecordsUseCase {
        records: state.record_repo(),
    };
    let records = uc.execute(&identity.user_id, range).await?;
    Ok(Json(records))
}

// ── GET /records/@me/vitals ──────────────────────────────────────────────────

pub async fn get_own_vitals(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<VitalPoint>>, RecordsServiceError> {
    require(&identity, Role::Patient)?;
    let uc = GetVitalTrendUseCase {
        records: state.record_repo(),
    };
    Ok(Json(uc.execute(&identity.user_id).await?))
}

// ── GET /records/patients/{id} ───────────────────────────────────────────────

pub async fn get_patient_chart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<PatientChart>, RecordsServiceError> {
    require(&identity, Role::Doctor)?;
    let patient_id: AccountId = patient_id
        .parse()
        .map_err(|_| RecordsServiceError::PatientNotFound)?;
    let range: DateRange = parse_query(raw_query.as_deref())?;

    let uc = GetPatientChartUseCase {
        records: state.record_repo(),
        allergies: state.allergy_repo(),
        directory: state.directory_repo(),
    };
    let chart = uc.execute(&patient_id, range).await?;
    Ok(Json(chart))
}

// ── POST /records ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecordCreated {
    pub record_id: RecordId,
}

pub async fn add_record(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AddRecordInput>,
) -> Result<(StatusCode, Json<RecordCreated>), RecordsServiceError> {
    require(&identity, Role::Doctor)?;

    let uc = AddRecordUseCase {
        records: state.record_repo(),
        directory: state.directory_repo(),
    };
    let record_id = uc.execute(&identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(RecordCreated { record_id })))
}

// ── POST /records/batch ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BatchRequest {
    pub records: Vec<BatchRecordRow>,
}

pub async fn add_record_batch(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<BatchRequest>,
) -> Result<Json<BatchSummary>, RecordsServiceError> {
    require(&identity, Role::Doctor)?;

    let uc = AddRecordBatchUseCase {
        records: state.record_repo(),
        directory: state.directory_repo(),
    };
    let summary = uc.execute(&identity.user_id, body.records).await?;
    Ok(Json(summary))
}

// ── POST /records/batch/csv ──────────────────────────────────────────────────

pub async fn add_record_batch_csv(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchSummary>, RecordsServiceError> {
    require(&identity, Role::Doctor)?;
    let rows = parse_batch_csv(&body)?;

    let uc = AddRecordBatchUseCase {
        records: state.record_repo(),
        directory: state.directory_repo(),
    };
    let summary = uc.execute(&identity.user_id, rows).await?;
    Ok(Json(summary))
}

// ── GET /records/batch/template ──────────────────────────────────────────────

pub async fn get_batch_template(
    identity: IdentityHeaders,
) -> Result<([(header::HeaderName, String); 2], &'static str), RecordsServiceError> {
    require(&identity, Role::Doctor)?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{BATCH_TEMPLATE_FILENAME}\""),
        ),
    ];
    Ok((headers, BATCH_TEMPLATE_CSV))
}
