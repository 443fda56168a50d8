use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use medrec_core::sea_ext::contains_ci;
use medrec_domain::id::{AccountId, RecordId};
use medrec_domain::role::Role;
use medrec_records_schema::{allergies, doctors, medical_records, patients};

use crate::domain::repository::{AllergyRepository, DirectoryRepository, RecordRepository};
use crate::domain::types::{
    Allergy, DateRange, DoctorSearch, DoctorSummary, EmergencyProfile, MedicalRecordEntry,
    NewAllergy, NewMedicalRecord, PatientSearch, PatientSummary, VitalPoint, Vitals,
};
use crate::error::{DbResultExt, RecordsServiceError};

// ── Medical records ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecordRepository {
    pub db: DatabaseConnection,
}

impl RecordRepository for DbRecordRepository {
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
        range: DateRange,
    ) -> Result<Vec<MedicalRecordEntry>, RecordsServiceError> {
        let mut query = medical_records::Entity::find()
            .filter(medical_records::Column::PatientId.eq(patient_id.as_str()));
        if let Some(from) = range.from {
            query = query.filter(medical_records::Column::VisitDate.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(medical_records::Column::VisitDate.lte(to));
        }

        let rows = query
            .order_by_desc(medical_records::Column::VisitDate)
            .order_by_desc(medical_records::Column::RecordId)
            .find_also_related(doctors::Entity)
            .all(&self.db)
            .await
            .store_context("list medical records")?;

        rows.into_iter()
            .map(|(record, doctor)| record_entry(record, doctor))
            .collect()
    }

    async fn vitals_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<VitalPoint>, RecordsServiceError> {
        let rows = medical_records::Entity::find()
            .filter(medical_records::Column::PatientId.eq(patient_id.as_str()))
            .order_by_asc(medical_records::Column::VisitDate)
            .order_by_asc(medical_records::Column::RecordId)
            .all(&self.db)
            .await
            .store_context("list vitals")?;

        Ok(rows
            .into_iter()
            .map(|m| VitalPoint {
                visit_date: m.visit_date,
                vitals: vitals(&m),
            })
            .filter(|point| !point.vitals.is_empty())
            .collect())
    }

    async fn insert(&self, record: &NewMedicalRecord) -> Result<RecordId, RecordsServiceError> {
        let model = medical_records::ActiveModel {
            patient_id: Set(record.patient_id.as_str().to_owned()),
            doctor_id: Set(record.doctor_id.as_str().to_owned()),
            visit_date: Set(record.visit_date),
            diagnosis: Set(record.diagnosis.clone()),
            treatment: Set(record.treatment.clone()),
            prescription: Set(record.prescription.clone()),
            notes: Set(record.notes.clone()),
            glucose_level: Set(record.vitals.glucose_level),
            blood_pressure_systolic: Set(record.vitals.blood_pressure_systolic),
            blood_pressure_diastolic: Set(record.vitals.blood_pressure_diastolic),
            heart_rate: Set(record.vitals.heart_rate),
            temperature: Set(record.vitals.temperature),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .store_context("insert medical record")?;
        Ok(RecordId(model.record_id))
    }
}

fn vitals(m: &medical_records::Model) -> Vitals {
    Vitals {
        glucose_level: m.glucose_level,
        blood_pressure_systolic: m.blood_pressure_systolic,
        blood_pressure_diastolic: m.blood_pressure_diastolic,
        heart_rate: m.heart_rate,
        temperature: m.temperature,
    }
}

fn record_entry(
    m: medical_records::Model,
    doctor: Option<doctors::Model>,
) -> Result<MedicalRecordEntry, RecordsServiceError> {
    let patient_id: AccountId = m.patient_id.parse().context("stored patient id")?;
    let doctor_id: AccountId = m.doctor_id.parse().context("stored doctor id")?;
    let vitals = vitals(&m);
    let (doctor_name, doctor_specialization) = match doctor {
        Some(d) => (
            Some(Role::Doctor.display_name(&d.first_name, &d.last_name)),
            d.specialization,
        ),
        None => (None, None),
    };
    Ok(MedicalRecordEntry {
        record_id: RecordId(m.record_id),
        patient_id,
        doctor_id,
        doctor_name,
        doctor_specialization,
        visit_date: m.visit_date,
        diagnosis: m.diagnosis,
        treatment: m.treatment,
        prescription: m.prescription,
        notes: m.notes,
        vitals,
        created_at: m.created_at,
    })
}

// ── Allergies ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAllergyRepository {
    pub db: DatabaseConnection,
}

impl AllergyRepository for DbAllergyRepository {
    async fn list_for_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<Allergy>, RecordsServiceError> {
        let rows = allergies::Entity::find()
            .filter(allergies::Column::PatientId.eq(patient_id.as_str()))
            .order_by_asc(allergies::Column::AllergyId)
            .all(&self.db)
            .await
            .store_context("list allergies")?;
        rows.into_iter().map(allergy_from_model).collect()
    }

    async fn insert(&self, allergy: &NewAllergy) -> Result<Allergy, RecordsServiceError> {
        let model = allergies::ActiveModel {
            patient_id: Set(allergy.patient_id.as_str().to_owned()),
            allergy_name: Set(allergy.allergy_name.clone()),
            severity: Set(allergy.severity.as_str().to_owned()),
            notes: Set(allergy.notes.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .store_context("insert allergy")?;
        allergy_from_model(model)
    }
}

fn allergy_from_model(m: allergies::Model) -> Result<Allergy, RecordsServiceError> {
    Ok(Allergy {
        allergy_id: m.allergy_id,
        severity: m.severity.parse().context("stored allergy severity")?,
        allergy_name: m.allergy_name,
        notes: m.notes,
    })
}

// ── Patient / doctor directory ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDirectoryRepository {
    pub db: DatabaseConnection,
}

impl DirectoryRepository for DbDirectoryRepository {
    async fn find_patient(
        &self,
        patient_id: &AccountId,
    ) -> Result<Option<PatientSummary>, RecordsServiceError> {
        let model = patients::Entity::find_by_id(patient_id.as_str())
            .one(&self.db)
            .await
            .store_context("find patient")?;
        model.map(patient_summary).transpose()
    }

    async fn existing_patient_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, RecordsServiceError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<String> = patients::Entity::find()
            .select_only()
            .column(patients::Column::PatientId)
            .filter(patients::Column::PatientId.is_in(ids.iter().map(AccountId::as_str)))
            .into_tuple()
            .all(&self.db)
            .await
            .store_context("check patient ids")?;
        Ok(found.into_iter().filter_map(|id| id.parse().ok()).collect())
    }

    async fn search_patients(
        &self,
        search: &PatientSearch,
    ) -> Result<Vec<PatientSummary>, RecordsServiceError> {
        let mut query = patients::Entity::find();
        if let Some(term) = &search.term {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(patients::Column::PatientId, term))
                    .add(contains_ci(patients::Column::FirstName, term))
                    .add(contains_ci(patients::Column::LastName, term))
                    .add(contains_ci(patients::Column::Email, term))
                    .add(contains_ci(patients::Column::Phone, term)),
            );
        }
        if let Some(group) = search.blood_group {
            query = query.filter(patients::Column::BloodGroup.eq(group.as_str()));
        }

        let rows = query
            .order_by_asc(patients::Column::FirstName)
            .order_by_asc(patients::Column::LastName)
            .limit(search.page.limit())
            .offset(search.page.offset())
            .all(&self.db)
            .await
            .store_context("search patients")?;
        rows.into_iter().map(patient_summary).collect()
    }

    async fn search_doctors(
        &self,
        search: &DoctorSearch,
    ) -> Result<Vec<DoctorSummary>, RecordsServiceError> {
        let mut query = doctors::Entity::find();
        if let Some(term) = &search.term {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(doctors::Column::DoctorId, term))
                    .add(contains_ci(doctors::Column::FirstName, term))
                    .add(contains_ci(doctors::Column::LastName, term))
                    .add(contains_ci(doctors::Column::Email, term))
                    .add(contains_ci(doctors::Column::Specialization, term))
                    .add(contains_ci(doctors::Column::Hospital, term)),
            );
        }
        if let Some(specialization) = &search.specialization {
            query = query.filter(contains_ci(doctors::Column::Specialization, specialization));
        }
        if let Some(hospital) = &search.hospital {
            query = query.filter(contains_ci(doctors::Column::Hospital, hospital));
        }
        if let Some(min) = search.min_experience {
            query = query.filter(doctors::Column::ExperienceYears.gte(min));
        }
        if let Some(max) = search.max_experience {
            query = query.filter(doctors::Column::ExperienceYears.lte(max));
        }

        let rows = query
            .order_by_desc(doctors::Column::ExperienceYears)
            .order_by_asc(doctors::Column::FirstName)
            .limit(search.page.limit())
            .offset(search.page.offset())
            .all(&self.db)
            .await
            .store_context("search doctors")?;
        rows.into_iter().map(doctor_summary).collect()
    }

    async fn find_by_qr_token(
        &self,
        qr_token: &str,
    ) -> Result<Option<EmergencyProfile>, RecordsServiceError> {
        let model = patients::Entity::find()
            .filter(patients::Column::QrToken.eq(qr_token))
            .one(&self.db)
            .await
            .store_context("find patient by qr token")?;
        model.map(emergency_profile).transpose()
    }
}

fn patient_summary(m: patients::Model) -> Result<PatientSummary, RecordsServiceError> {
    let patient_id: AccountId = m.patient_id.parse().context("stored patient id")?;
    Ok(PatientSummary {
        patient_id,
        display_name: Role::Patient.display_name(&m.first_name, &m.last_name),
        email: m.email,
        phone: m.phone,
        date_of_birth: m.date_of_birth,
        gender: m.gender.as_deref().and_then(|s| s.parse().ok()),
        blood_group: m
            .blood_group
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        address: m.address,
        emergency_contact: m.emergency_contact,
        emergency_phone: m.emergency_phone,
        insurance_provider: m.insurance_provider,
        insurance_number: m.insurance_number,
        height_cm: m.height_cm,
        weight_kg: m.weight_kg,
        health_streak: u32::try_from(m.health_streak).unwrap_or(0),
    })
}

fn doctor_summary(m: doctors::Model) -> Result<DoctorSummary, RecordsServiceError> {
    let doctor_id: AccountId = m.doctor_id.parse().context("stored doctor id")?;
    Ok(DoctorSummary {
        doctor_id,
        display_name: Role::Doctor.display_name(&m.first_name, &m.last_name),
        email: m.email,
        phone: m.phone,
        specialization: m.specialization,
        hospital: m.hospital,
        experience_years: m.experience_years,
    })
}

fn emergency_profile(m: patients::Model) -> Result<EmergencyProfile, RecordsServiceError> {
    let patient_id: AccountId = m.patient_id.parse().context("stored patient id")?;
    Ok(EmergencyProfile {
        patient_id,
        display_name: Role::Patient.display_name(&m.first_name, &m.last_name),
        blood_group: m
            .blood_group
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        date_of_birth: m.date_of_birth,
        phone: m.phone,
        emergency_contact: m.emergency_contact,
        emergency_phone: m.emergency_phone,
    })
}
