use medrec_domain::medical::Severity;
use medrec_records::error::RecordsServiceError;
use medrec_records::usecase::allergy::{AddAllergyInput, AddAllergyUseCase, GetAllergiesUseCase};

use crate::helpers::*;

#[tokio::test]
async fn should_add_and_list_own_allergies() {
    let repo = MockAllergyRepo::default();
    let added = AddAllergyUseCase {
        allergies: repo.clone(),
    }
    .execute(
        &id(PATIENT_ID),
        AddAllergyInput {
            allergy_name: " Peanuts ".to_owned(),
            severity: Severity::Moderate,
            notes: Some("".to_owned()),
        },
    )
    .await
    .unwrap();

    assert_eq!(added.allergy_name, "Peanuts");
    assert_eq!(added.notes, None);

    let listed = GetAllergiesUseCase {
        allergies: repo.clone(),
    }
    .execute(&id(PATIENT_ID))
    .await
    .unwrap();
    assert_eq!(listed, vec![added]);

    let others = GetAllergiesUseCase { allergies: repo }
        .execute(&id(OTHER_PATIENT_ID))
        .await
        .unwrap();
    assert!(others.is_empty());
}

#[tokio::test]
async fn should_reject_blank_allergy_name() {
    let err = AddAllergyUseCase {
        allergies: MockAllergyRepo::default(),
    }
    .execute(
        &id(PATIENT_ID),
        AddAllergyInput {
            allergy_name: "  ".to_owned(),
            severity: Severity::Mild,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RecordsServiceError::MissingData));
}

#[test]
fn should_parse_severity_from_request_body() {
    let input: AddAllergyInput = serde_json::from_str(
        r#"{"allergy_name":"Latex","severity":"Severe","notes":"anaphylaxis"}"#,
    )
    .unwrap();
    assert_eq!(input.severity, Severity::Severe);
    assert!(serde_json::from_str::<AddAllergyInput>(r#"{"allergy_name":"Latex","severity":"Lethal"}"#).is_err());
}
