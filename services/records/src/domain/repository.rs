#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use medrec_domain::id::{AccountId, RecordId};

use crate::domain::types::{
    Allergy, DateRange, DoctorSearch, DoctorSummary, EmergencyProfile, MedicalRecordEntry,
    NewAllergy, NewMedicalRecord, PatientSearch, PatientSummary, VitalPoint,
};
use crate::error::RecordsServiceError;

/// Medical records with their vitals.
pub trait RecordRepository: Send + Sync {
    /// A patient's records within `range`, newest visit first.
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
        range: DateRange,
    ) -> Result<Vec<MedicalRecordEntry>, RecordsServiceError>;

    /// Visits that recorded at least one vital sign, oldest first.
    async fn vitals_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<VitalPoint>, RecordsServiceError>;

    async fn insert(&self, record: &NewMedicalRecord) -> Result<RecordId, RecordsServiceError>;
}

pub trait AllergyRepository: Send + Sync {
    /// Allergies of a patient, in insertion order.
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<Allergy>, RecordsServiceError>;

    async fn insert(&self, allergy: &NewAllergy) -> Result<Allergy, RecordsServiceError>;
}

/// Read access to the patient and doctor accounts owned by the auth service.
pub trait DirectoryRepository: Send + Sync {
    async fn find_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Option<PatientSummary>, RecordsServiceError>;

    /// The subset of `ids` that name an existing patient.
    async fn existing_patient_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, RecordsServiceError>;

    /// Ordered by first name, then last name.
    async fn search_patients(
        &self,
        search: &PatientSearch,
    ) -> Result<Vec<PatientSummary>, RecordsServiceError>;

    /// Most experienced first, ties by first name.
    async fn search_doctors(
        &self,
        search: &DoctorSearch,
    ) -> Result<Vec<DoctorSummary>, RecordsServiceError>;

    async fn find_by_qr_token(
        &self,
        qr_token: &str,
    ) -> Result<Option<EmergencyProfile>, RecordsServiceError>;
}
