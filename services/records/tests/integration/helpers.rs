use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};

use medrec_domain::id::{AccountId, RecordId};
use medrec_domain::medical::{BloodGroup, Severity};
use medrec_records::domain::repository::{
    AllergyRepository, DirectoryRepository, RecordRepository,
};
use medrec_records::domain::types::{
    Allergy, DateRange, DoctorSearch, DoctorSummary, EmergencyProfile, MedicalRecordEntry,
    NewAllergy, NewMedicalRecord, PatientSearch, PatientSummary, VitalPoint,
};
use medrec_records::error::RecordsServiceError;

pub const PATIENT_ID: &str = "PAT1A2B3C4D";
pub const OTHER_PATIENT_ID: &str = "PAT5E6F7A8B";
pub const DOCTOR_ID: &str = "DOC9F00E1A2";
pub const QR_TOKEN: &str = "0123456789abcdef0123456789abcdef";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn id(s: &str) -> AccountId {
    s.parse().unwrap()
}

fn store_down() -> RecordsServiceError {
    RecordsServiceError::StoreUnavailable(anyhow::anyhow!("connection refused"))
}

pub fn patient(patient_id: &str, first: &str, last: &str, blood_group: BloodGroup) -> PatientSummary {
    PatientSummary {
        patient_id: id(patient_id),
        display_name: format!("{first} {last}"),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: Some("555-0100".to_owned()),
        date_of_birth: Some(day(1990, 12, 10)),
        gender: None,
        blood_group,
        address: None,
        emergency_contact: Some("Charles Babbage".to_owned()),
        emergency_phone: Some("555-0199".to_owned()),
        insurance_provider: None,
        insurance_number: None,
        height_cm: Some(165),
        weight_kg: Some(58.5),
        health_streak: 3,
    }
}

pub fn doctor(doctor_id: &str, name: &str, specialization: &str, years: i32) -> DoctorSummary {
    DoctorSummary {
        doctor_id: id(doctor_id),
        display_name: format!("Dr. {name}"),
        email: format!("{}@hospital.example", name.to_lowercase()),
        phone: None,
        specialization: Some(specialization.to_owned()),
        hospital: Some("General".to_owned()),
        experience_years: Some(years),
    }
}

// ── MockRecordRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRecordRepo {
    pub inserted: Arc<Mutex<Vec<NewMedicalRecord>>>,
    pub unavailable: bool,
    /// 1-based insert attempt that drops the connection.
    pub fail_on_insert: Option<usize>,
    pub attempts: Arc<Mutex<usize>>,
}

impl MockRecordRepo {
    pub fn failing_on_insert(attempt: usize) -> Self {
        Self {
            fail_on_insert: Some(attempt),
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewMedicalRecord> {
        self.inserted.lock().unwrap().clone()
    }

    fn entries(&self, patient_id: &AccountId) -> Vec<(RecordId, NewMedicalRecord)> {
        self.inserted
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, r)| &r.patient_id == patient_id)
            .map(|(i, r)| (RecordId(i as i32 + 1), r.clone()))
            .collect()
    }
}

impl RecordRepository for MockRecordRepo {
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
        range: DateRange,
    ) -> Result<Vec<MedicalRecordEntry>, RecordsServiceError> {
        if self.unavailable {
            return Err(store_down());
        }
        let mut rows: Vec<MedicalRecordEntry> = self
            .entries(patient_id)
            .into_iter()
            .filter(|(_, r)| range.contains(r.visit_date))
            .map(|(record_id, r)| MedicalRecordEntry {
                record_id,
                patient_id: r.patient_id,
                doctor_id: r.doctor_id,
                doctor_name: Some("Dr. Gregory House".to_owned()),
                doctor_specialization: Some("Diagnostics".to_owned()),
                visit_date: r.visit_date,
                diagnosis: r.diagnosis,
                treatment: r.treatment,
                prescription: r.prescription,
                notes: r.notes,
                vitals: r.vitals,
                created_at: Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap(),
            })
            .collect();
        rows.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        Ok(rows)
    }

    async fn vitals_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<VitalPoint>, RecordsServiceError> {
        if self.unavailable {
            return Err(store_down());
        }
        let mut points: Vec<VitalPoint> = self
            .entries(patient_id)
            .into_iter()
            .filter(|(_, r)| !r.vitals.is_empty())
            .map(|(_, r)| VitalPoint {
                visit_date: r.visit_date,
                vitals: r.vitals,
            })
            .collect();
        points.sort_by_key(|p| p.visit_date);
        Ok(points)
    }

    async fn insert(&self, record: &NewMedicalRecord) -> Result<RecordId, RecordsServiceError> {
        if self.unavailable {
            return Err(store_down());
        }
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_on_insert == Some(attempt) {
            return Err(store_down());
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(record.clone());
        Ok(RecordId(inserted.len() as i32))
    }
}

// ── MockAllergyRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAllergyRepo {
    pub rows: Arc<Mutex<Vec<(AccountId, Allergy)>>>,
}

impl MockAllergyRepo {
    pub fn with(patient_id: &str, name: &str, severity: Severity) -> Self {
        let repo = Self::default();
        repo.rows.lock().unwrap().push((
            id(patient_id),
            Allergy {
                allergy_id: 1,
                allergy_name: name.to_owned(),
                severity,
                notes: None,
            },
        ));
        repo
    }
}

impl AllergyRepository for MockAllergyRepo {
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<Allergy>, RecordsServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == patient_id)
            .map(|(_, allergy)| allergy.clone())
            .collect())
    }

    async fn insert(&self, allergy: &NewAllergy) -> Result<Allergy, RecordsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = Allergy {
            allergy_id: rows.len() as i32 + 1,
            allergy_name: allergy.allergy_name.clone(),
            severity: allergy.severity,
            notes: allergy.notes.clone(),
        };
        rows.push((allergy.patient_id.clone(), stored.clone()));
        Ok(stored)
    }
}

// ── MockDirectory ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockDirectory {
    pub patients: Vec<PatientSummary>,
    pub doctors: Vec<DoctorSummary>,
    /// `(qr_token, patient_id)`
    pub qr_tokens: Vec<(String, AccountId)>,
    pub last_patient_search: Arc<Mutex<Option<PatientSearch>>>,
    pub last_doctor_search: Arc<Mutex<Option<DoctorSearch>>>,
}

impl MockDirectory {
    pub fn with_patient() -> Self {
        Self {
            patients: vec![patient(PATIENT_ID, "Ada", "Lovelace", BloodGroup::ONeg)],
            qr_tokens: vec![(QR_TOKEN.to_owned(), id(PATIENT_ID))],
            ..Default::default()
        }
    }
}

impl DirectoryRepository for MockDirectory {
    async fn find_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Option<PatientSummary>, RecordsServiceError> {
        Ok(self
            .patients
            .iter()
            .find(|p| &p.patient_id == patient_id)
            .cloned())
    }

    async fn existing_patient_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, RecordsServiceError> {
        Ok(ids
            .iter()
            .filter(|id| self.patients.iter().any(|p| &p.patient_id == *id))
            .cloned()
            .collect())
    }

    async fn search_patients(
        &self,
        search: &PatientSearch,
    ) -> Result<Vec<PatientSummary>, RecordsServiceError> {
        *self.last_patient_search.lock().unwrap() = Some(search.clone());
        Ok(self
            .patients
            .iter()
            .filter(|p| search.blood_group.is_none_or(|g| g == p.blood_group))
            .filter(|p| {
                search.term.as_deref().is_none_or(|t| {
                    p.display_name.to_lowercase().contains(&t.to_lowercase())
                })
            })
            .cloned()
            .collect())
    }

    async fn search_doctors(
        &self,
        search: &DoctorSearch,
    ) -> Result<Vec<DoctorSummary>, RecordsServiceError> {
        *self.last_doctor_search.lock().unwrap() = Some(search.clone());
        Ok(self
            .doctors
            .iter()
            .filter(|d| {
                search
                    .min_experience
                    .is_none_or(|min| d.experience_years.unwrap_or(0) >= min)
            })
            .cloned()
            .collect())
    }

    async fn find_by_qr_token(
        &self,
        qr_token: &str,
    ) -> Result<Option<EmergencyProfile>, RecordsServiceError> {
        let Some((_, patient_id)) = self.qr_tokens.iter().find(|(t, _)| t == qr_token) else {
            return Ok(None);
        };
        Ok(self
            .patients
            .iter()
            .find(|p| &p.patient_id == patient_id)
            .map(|p| EmergencyProfile {
                patient_id: p.patient_id.clone(),
                display_name: p.display_name.clone(),
                blood_group: p.blood_group,
                date_of_birth: p.date_of_birth,
                phone: p.phone.clone(),
                emergency_contact: p.emergency_contact.clone(),
                emergency_phone: p.emergency_phone.clone(),
            }))
    }
}
