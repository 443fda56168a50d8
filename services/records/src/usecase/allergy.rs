use serde::Deserialize;

use medrec_domain::id::AccountId;
use medrec_domain::medical::Severity;

use crate::domain::repository::AllergyRepository;
use crate::domain::types::{Allergy, NewAllergy};
use crate::error::RecordsServiceError;

pub struct GetAllergiesUseCase<A: AllergyRepository> {
    pub allergies: A,
}

impl<A: AllergyRepository> GetAllergiesUseCase<A> {
    pub async fn execute(&self, patient_id: &AccountId) -> Result<Vec<Allergy>, RecordsServiceError> {
        self.allergies.list_for_patient(patient_id).await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAllergyInput {
    pub allergy_name: String,
    pub severity: Severity,
    pub notes: Option<String>,
}

pub struct AddAllergyUseCase<A: AllergyRepository> {
    pub allergies: A,
}

impl<A: AllergyRepository> AddAllergyUseCase<A> {
    pub async fn execute(
        &self,
        patient_id: &AccountId,
        input: AddAllergyInput,
    ) -> Result<Allergy, RecordsServiceError> {
        let allergy_name = input.allergy_name.trim();
        if allergy_name.is_empty() {
            return Err(RecordsServiceError::MissingData);
        }
        let allergy = NewAllergy {
            patient_id: patient_id.clone(),
            allergy_name: allergy_name.to_owned(),
            severity: input.severity,
            notes: input
                .notes
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty()),
        };
        self.allergies.insert(&allergy).await
    }
}
