use axum::{
    Json,
    extract::{State},
    http::StatusCode,
};

use medrec_auth_types::identity::IdentityHeaders;
use medrec_domain::role::Role;

use crate::domain::types::Allergy;
use crate::error::RecordsServiceError;
use crate::handlers::require;
use crate::state::AppState;
use crate::usecase::allergy::{AddAllergyInput, AddAllergyUseCase, GetAllergiesUseCase};

// ── GET /allergies/@me ───────────────────────────────────────────────────────

pub async fn get_own_allergies(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<Allergy>>, RecordsServiceError> {
    require(&identity, Role::Patient)?;
    let uc = GetAllergiesUseCase {
        allergies: state.allergy_repo(),
    };
    Ok(Json(uc.execute(&identity.user_id).await?))
}

// ── POST /allergies ──────────────────────────────────────────────────────────

pub async fn add_allergy(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AddAllergyInput>,
) -> Result<(StatusCode, Json<Allergy>), RecordsServiceError> {
    require(&identity, Role::Patient)?;

    let uc = AddAllergyUseCase {
        allergies: state.allergy_repo(),
    };
    let allergy = uc.execute(&identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(allergy)))
}
