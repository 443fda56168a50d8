use medrec_domain::medical::BloodGroup;
use medrec_domain::pagination::PageRequest;

use crate::domain::repository::DirectoryRepository;
use crate::domain::types::{DoctorSearch, DoctorSummary, PatientSearch, PatientSummary};
use crate::error::RecordsServiceError;

/// Blank search boxes mean "no filter".
fn search_term(term: Option<String>) -> Option<String> {
    term.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

// ── SearchPatients ───────────────────────────────────────────────────────────

pub struct SearchPatientsInput {
    pub term: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub page: PageRequest,
}

pub struct SearchPatientsUseCase<D: DirectoryRepository> {
    pub directory: D,
}

impl<D: DirectoryRepository> SearchPatientsUseCase<D> {
    pub async fn execute(
        &self,
        input: SearchPatientsInput,
    ) -> Result<Vec<PatientSummary>, RecordsServiceError> {
        let search = PatientSearch {
            term: search_term(input.term),
            blood_group: input.blood_group,
            page: input.page.clamped(),
        };
        self.directory.search_patients(&search).await
    }
}

// ── SearchDoctors ────────────────────────────────────────────────────────────

pub struct SearchDoctorsInput {
    pub term: Option<String>,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub page: PageRequest,
}

pub struct SearchDoctorsUseCase<D: DirectoryRepository> {
    pub directory: D,
}

impl<D: DirectoryRepository> SearchDoctorsUseCase<D> {
    pub async fn execute(
        &self,
        input: SearchDoctorsInput,
    ) -> Result<Vec<DoctorSummary>, RecordsServiceError> {
        // An inverted experience window matches nobody.
        if let (Some(min), Some(max)) = (input.min_experience, input.max_experience) {
            if min > max {
                return Ok(Vec::new());
            }
        }
        let search = DoctorSearch {
            term: search_term(input.term),
            specialization: search_term(input.specialization),
            hospital: search_term(input.hospital),
            min_experience: input.min_experience,
            max_experience: input.max_experience,
            page: input.page.clamped(),
        };
        self.directory.search_doctors(&search).await
    }
}
