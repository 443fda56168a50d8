use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medrec_domain::id::{AccountId, RecordId};
use medrec_domain::medical::{BloodGroup, Gender, Severity};
use medrec_domain::pagination::PageRequest;

use crate::error::RecordsServiceError;

/// Vital signs captured at a visit. Every reading is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub glucose_level: Option<f64>,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
}

impl Vitals {
    pub fn is_empty(&self) -> bool {
        self.glucose_level.is_none()
            && self.blood_pressure_systolic.is_none()
            && self.blood_pressure_diastolic.is_none()
            && self.heart_rate.is_none()
            && self.temperature.is_none()
    }
}

/// Stored medical record with the attending doctor resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalRecordEntry {
    pub record_id: RecordId,
    pub patient_id: AccountId,
    pub doctor_id: AccountId,
    /// `None` if the doctor row is gone.
    pub doctor_name: Option<String>,
    pub doctor_specialization: Option<String>,
    pub visit_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub vitals: Vitals,
    #[serde(serialize_with = "medrec_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicalRecord {
    pub patient_id: AccountId,
    pub doctor_id: AccountId,
    pub visit_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub vitals: Vitals,
}

impl NewMedicalRecord {
    /// A visit must carry some text or at least one vital sign.
    pub fn has_content(&self) -> bool {
        self.diagnosis.is_some()
            || self.treatment.is_some()
            || self.prescription.is_some()
            || self.notes.is_some()
            || !self.vitals.is_empty()
    }
}

/// One point of a patient's vitals trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalPoint {
    pub visit_date: NaiveDate,
    #[serde(flatten)]
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allergy {
    pub allergy_id: i32,
    pub allergy_name: String,
    pub severity: Severity,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAllergy {
    pub patient_id: AccountId,
    pub allergy_name: String,
    pub severity: Severity,
    pub notes: Option<String>,
}

/// Patient as shown in directory listings and on a doctor's chart view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub patient_id: AccountId,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_group: BloodGroup,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<f64>,
    pub health_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorSummary {
    pub doctor_id: AccountId,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub experience_years: Option<i32>,
}

/// Everything a doctor sees when opening a patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientChart {
    pub patient: PatientSummary,
    pub records: Vec<MedicalRecordEntry>,
    pub allergies: Vec<Allergy>,
}

/// Fields printed on the public emergency page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyProfile {
    pub patient_id: AccountId,
    pub display_name: String,
    pub blood_group: BloodGroup,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyCard {
    #[serde(flatten)]
    pub profile: EmergencyProfile,
    pub allergies: Vec<Allergy>,
}

/// Inclusive visit-date window; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn validated(self) -> Result<Self, RecordsServiceError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(RecordsServiceError::InvalidDateRange),
            _ => Ok(self),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientSearch {
    /// Matched case-insensitively against id, names, email and phone.
    pub term: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorSearch {
    /// Matched case-insensitively against id, names, email, specialization
    /// and hospital.
    pub term: Option<String>,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub page: PageRequest,
}

/// Per-row result of a batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchRowOutcome {
    Added { record_id: RecordId },
    UnknownPatient,
    Invalid { reason: String },
    /// The row was valid but could not be stored.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRowResult {
    /// 1-based position in the submitted batch.
    pub row: usize,
    pub patient_id: String,
    #[serde(flatten)]
    pub outcome: BatchRowOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub added: usize,
    pub failed: usize,
    pub rows: Vec<BatchRowResult>,
}
