use chrono::{NaiveDate, NaiveDateTime};

use crate::error::RecordsServiceError;
use crate::usecase::records::BatchRecordRow;

/// Downloadable starting point for CSV uploads.
pub const BATCH_TEMPLATE_CSV: &str = "\
patient_id,visit_date,diagnosis,treatment,prescription,notes,glucose_level,blood_pressure_systolic,blood_pressure_diastolic,heart_rate,temperature
PAT12345678,2024-01-15,Hypertension,Lifestyle modification and medication,Lisinopril 10mg daily,Patient shows good compliance,95,140,90,72,36.8
PAT87654321,2024-01-16,Type 2 Diabetes,Diet control and medication,Metformin 500mg twice daily,Blood sugar levels improving,180,130,85,68,37.1
PAT11223344,2024-01-17,Common Cold,Rest and symptomatic treatment,Paracetamol as needed,Symptoms should resolve in 7-10 days,,120,80,75,37.2
";

pub const BATCH_TEMPLATE_FILENAME: &str = "medical_records_template.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    PatientId,
    VisitDate,
    Diagnosis,
    Treatment,
    Prescription,
    Notes,
    GlucoseLevel,
    Systolic,
    Diastolic,
    HeartRate,
    Temperature,
}

impl Column {
    const REQUIRED: [Column; 2] = [Column::PatientId, Column::VisitDate];

    /// Headers are matched case-insensitively with spaces read as underscores.
    fn from_header(header: &str) -> Option<Self> {
        let key = header
            .trim_start_matches('\u{feff}')
            .trim()
            .to_lowercase()
            .replace(' ', "_");
        let column = match key.as_str() {
            "patient_id" | "patientid" | "id" => Self::PatientId,
            "visit_date" | "date" => Self::VisitDate,
            "diagnosis" | "condition" | "primary_diagnosis" => Self::Diagnosis,
            "treatment" | "treatment_plan" | "therapy" => Self::Treatment,
            "prescription" | "medications" | "drugs" => Self::Prescription,
            "notes" | "comments" | "observations" => Self::Notes,
            "glucose" | "glucose_level" | "blood_glucose" => Self::GlucoseLevel,
            "systolic" | "bp_systolic" | "blood_pressure_systolic" => Self::Systolic,
            "diastolic" | "bp_diastolic" | "blood_pressure_diastolic" => Self::Diastolic,
            "heart_rate" | "pulse" | "hr" => Self::HeartRate,
            "temperature" | "temp" | "body_temp" => Self::Temperature,
            _ => return None,
        };
        Some(column)
    }

    fn name(self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::VisitDate => "visit_date",
            Self::Diagnosis => "diagnosis",
            Self::Treatment => "treatment",
            Self::Prescription => "prescription",
            Self::Notes => "notes",
            Self::GlucoseLevel => "glucose_level",
            Self::Systolic => "blood_pressure_systolic",
            Self::Diastolic => "blood_pressure_diastolic",
            Self::HeartRate => "heart_rate",
            Self::Temperature => "temperature",
        }
    }

    /// Unparseable dates and vitals are left empty; row checks report them.
    fn apply(self, row: &mut BatchRecordRow, value: &str) {
        match self {
            Self::PatientId => row.patient_id = value.to_owned(),
            Self::VisitDate => row.visit_date = parse_date(value),
            Self::Diagnosis => row.diagnosis = Some(value.to_owned()),
            Self::Treatment => row.treatment = Some(value.to_owned()),
            Self::Prescription => row.prescription = Some(value.to_owned()),
            Self::Notes => row.notes = Some(value.to_owned()),
            Self::GlucoseLevel => row.vitals.glucose_level = parse_number(value),
            Self::Systolic => row.vitals.blood_pressure_systolic = parse_whole(value),
            Self::Diastolic => row.vitals.blood_pressure_diastolic = parse_whole(value),
            Self::HeartRate => row.vitals.heart_rate = parse_whole(value),
            Self::Temperature => row.vitals.temperature = parse_number(value),
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

// Spreadsheets often export whole numbers as "72.0".
fn parse_whole(value: &str) -> Option<i32> {
    parse_number(value)
        .filter(|v| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(v))
        .map(|v| v.round() as i32)
}

fn unreadable(e: csv::Error) -> RecordsServiceError {
    RecordsServiceError::InvalidTemplate(format!("unreadable csv: {e}"))
}

/// Read a CSV upload into batch rows. Unknown columns are ignored, a
/// repeated column keeps its first occurrence, and fully blank lines are
/// skipped. Fails only when the file itself is unusable.
pub fn parse_batch_csv(body: &[u8]) -> Result<Vec<BatchRecordRow>, RecordsServiceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body);

    let mut columns: Vec<Option<Column>> = Vec::new();
    for header in reader.headers().map_err(unreadable)?.iter() {
        let column = Column::from_header(header).filter(|c| !columns.contains(&Some(*c)));
        columns.push(column);
    }

    let missing: Vec<&str> = Column::REQUIRED
        .iter()
        .filter(|c| !columns.contains(&Some(**c)))
        .map(|c| c.name())
        .collect();
    if !missing.is_empty() {
        return Err(RecordsServiceError::InvalidTemplate(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut row = BatchRecordRow::default();
        for (column, value) in columns.iter().zip(record.iter()) {
            match column {
                Some(column) if !value.is_empty() => column.apply(&mut row, value),
                _ => {}
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
