use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::types::EmergencyCard;
use crate::error::RecordsServiceError;
use crate::state::AppState;
use crate::usecase::emergency::GetEmergencyCardUseCase;

// ── GET /emergency/{qr_token} ────────────────────────────────────────────────

/// No identity headers: first responders scan the card without an account.
pub async fn get_emergency_card(
    State(state): State<AppState>,
    Path(qr_token): Path<String>,
) -> Result<Json<EmergencyCard>, RecordsServiceError> {
    let uc = GetEmergencyCardUseCase {
        directory: state.directory_repo(),
        allergies: state.allergy_repo(),
    };
    Ok(Json(uc.execute(&qr_token).await?))
}
