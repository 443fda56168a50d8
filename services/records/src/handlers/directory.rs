use axum::{
    Json,
    extract::{RawQuery, State},
};
use serde::Deserialize;

use medrec_auth_types::identity::IdentityHeaders;
use medrec_domain::medical::BloodGroup;
use medrec_domain::pagination::PageRequest;
use medrec_domain::role::Role;

use crate::domain::types::{DoctorSummary, PatientSummary};
use crate::error::RecordsServiceError;
use crate::handlers::{parse_query, require};
use crate::state::AppState;
use crate::usecase::directory::{
    SearchDoctorsInput, SearchDoctorsUseCase, SearchPatientsInput, SearchPatientsUseCase,
};

fn page(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    let default = PageRequest::default();
    PageRequest {
        per_page: per_page.unwrap_or(default.per_page),
        page: page.unwrap_or(default.page),
    }
}

// ── GET /patients ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PatientSearchQuery {
    pub q: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn search_patients(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<PatientSummary>>, RecordsServiceError> {
    require(&identity, Role::Doctor)?;
    let query: PatientSearchQuery = parse_query(raw_query.as_deref())?;

    let uc = SearchPatientsUseCase {
        directory: state.directory_repo(),
    };
    let patients = uc
        .execute(SearchPatientsInput {
            term: query.q,
            blood_group: query.blood_group,
            page: page(query.per_page, query.page),
        })
        .await?;
    Ok(Json(patients))
}

// ── GET /doctors ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DoctorSearchQuery {
    pub q: Option<String>,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

/// Open to both roles.
pub async fn search_doctors(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<DoctorSummary>>, RecordsServiceError> {
    let query: DoctorSearchQuery = parse_query(raw_query.as_deref())?;

    let uc = SearchDoctorsUseCase {
        directory: state.directory_repo(),
    };
    let doctors = uc
        .execute(SearchDoctorsInput {
            term: query.q,
            specialization: query.specialization,
            hospital: query.hospital,
            min_experience: query.min_experience,
            max_experience: query.max_experience,
            page: page(query.per_page, query.page),
        })
        .await?;
    Ok(Json(doctors))
}
