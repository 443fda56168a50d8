use chrono::NaiveDate;
use serde::Deserialize;

use medrec_domain::id::{AccountId, RecordId};
use medrec_domain::role::Role;

use crate::domain::repository::{AllergyRepository, DirectoryRepository, RecordRepository};
use crate::domain::types::{
    BatchRowOutcome, BatchRowResult, BatchSummary, DateRange, MedicalRecordEntry,
    NewMedicalRecord, PatientChart, VitalPoint, Vitals,
};
use crate::error::RecordsServiceError;

/// Blank strings count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── GetOwnRecords ────────────────────────────────────────────────────────────

pub struct GetOwnRecordsUseCase<R: RecordRepository> {
    pub records: R,
}

impl<R: RecordRepository> GetOwnRecordsUseCase<R> {
    pub async fn execute(
        &self,
        patient_id: &AccountId,
        range: DateRange,
    ) -> Result<Vec<MedicalRecordEntry>, RecordsServiceError> {
        let range = range.validated()?;
        self.records.list_for_patient(patient_id, range).await
    }
}

// ── GetVitalTrend ────────────────────────────────────────────────────────────

pub struct GetVitalTrendUseCase<R: RecordRepository> {
    pub records: R,
}

impl<R: RecordRepository> GetVitalTrendUseCase<R> {
    pub async fn execute(
        &self,
        patient_id: &AccountId,
    ) -> Result<Vec<VitalPoint>, RecordsServiceError> {
        self.records.vitals_for_patient(patient_id).await
    }
}

// ── GetPatientChart ──────────────────────────────────────────────────────────

pub struct GetPatientChartUseCase<R, A, D>
where
    R: RecordRepository,
    A: AllergyRepository,
    D: DirectoryRepository,
{
    pub records: R,
    pub allergies: A,
    pub directory: D,
}

impl<R, A, D> GetPatientChartUseCase<R, A, D>
where
    R: RecordRepository,
    A: AllergyRepository,
    D: DirectoryRepository,
{
    pub async fn execute(
        &self,
        patient_id: &AccountId,
        range: DateRange,
    ) -> Result<PatientChart, RecordsServiceError> {
        let range = range.validated()?;
        let patient = self
            .directory
            .find_patient(patient_id)
            .await?
            .ok_or(RecordsServiceError::PatientNotFound)?;
        let records = self.records.list_for_patient(patient_id, range).await?;
        let allergies = self.allergies.list_for_patient(patient_id).await?;
        Ok(PatientChart {
            patient,
            records,
            allergies,
        })
    }
}

// ── AddRecord ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AddRecordInput {
    pub patient_id: AccountId,
    pub visit_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub vitals: Vitals,
}

impl AddRecordInput {
    /// `None` when the visit carries neither text nor vitals.
    fn into_new_record(self, doctor_id: &AccountId) -> Option<NewMedicalRecord> {
        let record = NewMedicalRecord {
            patient_id: self.patient_id,
            doctor_id: doctor_id.clone(),
            visit_date: self.visit_date,
            diagnosis: non_blank(self.diagnosis),
            treatment: non_blank(self.treatment),
            prescription: non_blank(self.prescription),
            notes: non_blank(self.notes),
            vitals: self.vitals,
        };
        record.has_content().then_some(record)
    }
}

pub struct AddRecordUseCase<R, D>
where
    R: RecordRepository,
    D: DirectoryRepository,
{
    pub records: R,
    pub directory: D,
}

impl<R, D> AddRecordUseCase<R, D>
where
    R: RecordRepository,
    D: DirectoryRepository,
{
    pub async fn execute(
        &self,
        doctor_id: &AccountId,
        input: AddRecordInput,
    ) -> Result<RecordId, RecordsServiceError> {
        let record = input
            .into_new_record(doctor_id)
            .ok_or(RecordsServiceError::MissingData)?;

        if record.patient_id.role() != Role::Patient
            || self.directory.find_patient(&record.patient_id).await?.is_none()
        {
            return Err(RecordsServiceError::PatientNotFound);
        }

        let record_id = self.records.insert(&record).await?;
        tracing::info!(
            %record_id,
            patient_id = %record.patient_id,
            doctor_id = %doctor_id,
            "medical record added"
        );
        Ok(record_id)
    }
}

// ── AddRecordBatch ───────────────────────────────────────────────────────────

/// One row of a batch upload, either from a JSON body or a CSV template.
/// Fields arrive loosely typed and are checked row by row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchRecordRow {
    pub patient_id: String,
    pub visit_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub vitals: Vitals,
}

enum RowCheck {
    Ready(NewMedicalRecord),
    Rejected(BatchRowOutcome),
}

impl BatchRecordRow {
    fn check(self, doctor_id: &AccountId) -> RowCheck {
        let patient_id = match self.patient_id.trim().parse::<AccountId>() {
            Ok(id) if id.role() == Role::Patient => id,
            Ok(_) => return RowCheck::Rejected(BatchRowOutcome::UnknownPatient),
            Err(_) => {
                return RowCheck::Rejected(BatchRowOutcome::Invalid {
                    reason: "missing or malformed patient id".to_owned(),
                });
            }
        };
        let Some(visit_date) = self.visit_date else {
            return RowCheck::Rejected(BatchRowOutcome::Invalid {
                reason: "missing visit date".to_owned(),
            });
        };
        let record = NewMedicalRecord {
            patient_id,
            doctor_id: doctor_id.clone(),
            visit_date,
            diagnosis: non_blank(self.diagnosis),
            treatment: non_blank(self.treatment),
            prescription: non_blank(self.prescription),
            notes: non_blank(self.notes),
            vitals: self.vitals,
        };
        if !record.has_content() {
            return RowCheck::Rejected(BatchRowOutcome::Invalid {
                reason: "empty visit".to_owned(),
            });
        }
        RowCheck::Ready(record)
    }
}

pub struct AddRecordBatchUseCase<R, D>
where
    R: RecordRepository,
    D: DirectoryRepository,
{
    pub records: R,
    pub directory: D,
}

impl<R, D> AddRecordBatchUseCase<R, D>
where
    R: RecordRepository,
    D: DirectoryRepository,
{
    /// Insert every valid row whose patient exists. Bad rows and rows the
    /// store rejects are reported per row; they never abort the batch, so the
    /// summary always matches what was committed.
    pub async fn execute(
        &self,
        doctor_id: &AccountId,
        rows: Vec<BatchRecordRow>,
    ) -> Result<BatchSummary, RecordsServiceError> {
        if rows.is_empty() {
            return Err(RecordsServiceError::MissingData);
        }

        let checked: Vec<(String, RowCheck)> = rows
            .into_iter()
            .map(|row| (row.patient_id.trim().to_owned(), row.check(doctor_id)))
            .collect();

        let candidates: Vec<AccountId> = checked
            .iter()
            .filter_map(|(_, check)| match check {
                RowCheck::Ready(record) => Some(record.patient_id.clone()),
                RowCheck::Rejected(_) => None,
            })
            .collect();
        let known = self.directory.existing_patient_ids(&candidates).await?;

        let mut results = Vec::with_capacity(checked.len());
        for (index, (patient_id, check)) in checked.into_iter().enumerate() {
            let outcome = match check {
                RowCheck::Rejected(outcome) => outcome,
                RowCheck::Ready(record) if !known.contains(&record.patient_id) => {
                    BatchRowOutcome::UnknownPatient
                }
                RowCheck::Ready(record) => match self.records.insert(&record).await {
                    Ok(record_id) => BatchRowOutcome::Added { record_id },
                    Err(e) => {
                        tracing::warn!(row = index + 1, error = %e, "batch row not stored");
                        BatchRowOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                },
            };
            results.push(BatchRowResult {
                row: index + 1,
                patient_id,
                outcome,
            });
        }

        let added = results
            .iter()
            .filter(|r| matches!(r.outcome, BatchRowOutcome::Added { .. }))
            .count();
        let failed = results.len() - added;
        tracing::info!(doctor_id = %doctor_id, added, failed, "record batch processed");

        Ok(BatchSummary {
            added,
            failed,
            rows: results,
        })
    }
}
