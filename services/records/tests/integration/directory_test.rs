use medrec_domain::medical::BloodGroup;
use medrec_domain::pagination::PageRequest;
use medrec_records::usecase::directory::{
    SearchDoctorsInput, SearchDoctorsUseCase, SearchPatientsInput, SearchPatientsUseCase,
};

use crate::helpers::*;

fn directory() -> MockDirectory {
    MockDirectory {
        patients: vec![
            patient(PATIENT_ID, "Ada", "Lovelace", BloodGroup::ONeg),
            patient(OTHER_PATIENT_ID, "Grace", "Hopper", BloodGroup::APos),
        ],
        doctors: vec![
            doctor(DOCTOR_ID, "House", "Diagnostics", 20),
            doctor("DOC11112222", "Wilson", "Oncology", 8),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn should_filter_patients_by_blood_group() {
    let dir = directory();
    let found = SearchPatientsUseCase {
        directory: dir.clone(),
    }
    .execute(SearchPatientsInput {
        term: None,
        blood_group: Some(BloodGroup::APos),
        page: PageRequest::default(),
    })
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "Grace Hopper");
}

#[tokio::test]
async fn should_drop_blank_term_and_clamp_page() {
    let dir = directory();
    let found = SearchPatientsUseCase {
        directory: dir.clone(),
    }
    .execute(SearchPatientsInput {
        term: Some("   ".to_owned()),
        blood_group: None,
        page: PageRequest {
            per_page: 1000,
            page: 0,
        },
    })
    .await
    .unwrap();

    assert_eq!(found.len(), 2);
    let search = dir.last_patient_search.lock().unwrap().clone().unwrap();
    assert_eq!(search.term, None);
    assert_eq!(search.page.per_page, 100);
    assert_eq!(search.page.page, 1);
}

#[tokio::test]
async fn should_pass_trimmed_doctor_filters() {
    let dir = directory();
    let found = SearchDoctorsUseCase {
        directory: dir.clone(),
    }
    .execute(SearchDoctorsInput {
        term: Some(" house ".to_owned()),
        specialization: Some("".to_owned()),
        hospital: Some("General".to_owned()),
        min_experience: Some(10),
        max_experience: None,
        page: PageRequest::default(),
    })
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    let search = dir.last_doctor_search.lock().unwrap().clone().unwrap();
    assert_eq!(search.term.as_deref(), Some("house"));
    assert_eq!(search.specialization, None);
    assert_eq!(search.hospital.as_deref(), Some("General"));
}

#[tokio::test]
async fn should_return_nobody_for_inverted_experience_window() {
    let dir = directory();
    let found = SearchDoctorsUseCase {
        directory: dir.clone(),
    }
    .execute(SearchDoctorsInput {
        term: None,
        specialization: None,
        hospital: None,
        min_experience: Some(15),
        max_experience: Some(5),
        page: PageRequest::default(),
    })
    .await
    .unwrap();

    assert!(found.is_empty());
    assert!(dir.last_doctor_search.lock().unwrap().is_none());
}
