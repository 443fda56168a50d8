use crate::domain::repository::{AllergyRepository, DirectoryRepository};
use crate::domain::types::EmergencyCard;
use crate::error::RecordsServiceError;

/// Public lookup behind the QR code on a patient's emergency card.
pub struct GetEmergencyCardUseCase<D, A>
where
    D: DirectoryRepository,
    A: AllergyRepository,
{
    pub directory: D,
    pub allergies: A,
}

impl<D, A> GetEmergencyCardUseCase<D, A>
where
    D: DirectoryRepository,
    A: AllergyRepository,
{
    pub async fn execute(&self, qr_token: &str) -> Result<EmergencyCard, RecordsServiceError> {
        let qr_token = qr_token.trim();
        if qr_token.is_empty() {
            return Err(RecordsServiceError::PatientNotFound);
        }
        let profile = self
            .directory
            .find_by_qr_token(qr_token)
            .await?
            .ok_or(RecordsServiceError::PatientNotFound)?;
        let allergies = self.allergies.list_for_patient(&profile.patient_id).await?;
        // Scans are logged without the token itself.
        tracing::info!(patient_id = %profile.patient_id, "emergency card viewed");
        Ok(EmergencyCard { profile, allergies })
    }
}
