use medrec_auth::domain::session::{AuthState, SessionContext};
use medrec_auth::error::AuthServiceError;
use medrec_auth::usecase::login::{LoginInput, SubmitCredentialsUseCase};
use medrec_core::clock::Clock;
use medrec_domain::role::Role;
use medrec_testing::clock::ManualClock;

use crate::helpers::{
    DOCTOR_ID, MockCredentialStore, MockMailer, PASSWORD, PATIENT_EMAIL, clock, issuer,
    test_doctor, test_patient,
};

fn usecase(
    credentials: MockCredentialStore,
    mailer: &MockMailer,
    clock: &ManualClock,
) -> SubmitCredentialsUseCase<MockCredentialStore, MockMailer, ManualClock> {
    SubmitCredentialsUseCase {
        credentials,
        otp: issuer(mailer),
        clock: clock.clone(),
    }
}

fn input(role: Role, identifier: &str, password: &str) -> LoginInput {
    LoginInput {
        role,
        identifier: identifier.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_otp_for_patient_email_login() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(MockCredentialStore::new(vec![test_patient()]), &mailer, &clock);
    let mut session = SessionContext::new(clock.now());

    let issued = uc
        .execute(&mut session, input(Role::Patient, PATIENT_EMAIL, PASSWORD))
        .await
        .unwrap();

    assert_eq!(issued.target_email, PATIENT_EMAIL);
    assert_eq!(issued.expires_in_secs, 300);
    assert_eq!(mailer.sent_count(), 1);
    assert_eq!(mailer.sent.lock().unwrap()[0].to, PATIENT_EMAIL);

    let challenge = session.pending_challenge().unwrap();
    assert_eq!(challenge.attempts_used, 0);
    assert_eq!(
        challenge.issued.as_ref().unwrap().issued_at,
        clock.now(),
        "issuance time is recorded"
    );
}

#[tokio::test]
async fn should_accept_doctor_id_as_identifier() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(MockCredentialStore::new(vec![test_doctor()]), &mailer, &clock);
    let mut session = SessionContext::new(clock.now());

    uc.execute(&mut session, input(Role::Doctor, DOCTOR_ID, PASSWORD))
        .await
        .unwrap();

    assert!(matches!(session.auth, AuthState::OtpPending(_)));
}

#[tokio::test]
async fn should_not_distinguish_unknown_account_from_wrong_password() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(MockCredentialStore::new(vec![test_patient()]), &mailer, &clock);

    for attempt in [
        input(Role::Patient, PATIENT_EMAIL, "wrong"),
        input(Role::Patient, "nobody@example.com", PASSWORD),
        // Right credentials, wrong role table.
        input(Role::Doctor, PATIENT_EMAIL, PASSWORD),
        input(Role::Patient, "   ", PASSWORD),
    ] {
        let mut session = SessionContext::new(clock.now());
        let result = uc.execute(&mut session, attempt).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
        assert_eq!(session.auth, AuthState::Unauthenticated);
    }
    assert_eq!(mailer.sent_count(), 0, "no OTP for failed credentials");
}

#[tokio::test]
async fn should_report_store_unavailable() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(MockCredentialStore::unavailable(), &mailer, &clock);
    let mut session = SessionContext::new(clock.now());

    let result = uc
        .execute(&mut session, input(Role::Patient, PATIENT_EMAIL, PASSWORD))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::StoreUnavailable(_))),
        "expected StoreUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_stay_unauthenticated_when_dispatch_fails() {
    let clock = clock();
    let mailer = MockMailer::failing("smtp timeout");
    let uc = usecase(MockCredentialStore::new(vec![test_patient()]), &mailer, &clock);
    let mut session = SessionContext::new(clock.now());

    let result = uc
        .execute(&mut session, input(Role::Patient, PATIENT_EMAIL, PASSWORD))
        .await;

    match result {
        Err(AuthServiceError::OtpDispatchFailed(detail)) => assert_eq!(detail, "smtp timeout"),
        other => panic!("expected OtpDispatchFailed, got {other:?}"),
    }
    assert_eq!(session.auth, AuthState::Unauthenticated);
}

#[tokio::test]
async fn should_refuse_login_when_already_authenticated() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(MockCredentialStore::new(vec![test_patient()]), &mailer, &clock);
    let mut session = SessionContext::new(clock.now());
    session.auth = AuthState::Authenticated(test_patient().user);

    let result = uc
        .execute(&mut session, input(Role::Patient, PATIENT_EMAIL, PASSWORD))
        .await;

    assert!(matches!(result, Err(AuthServiceError::AlreadyAuthenticated)));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn should_supersede_previous_challenge() {
    let clock = clock();
    let mailer = MockMailer::default();
    let uc = usecase(
        MockCredentialStore::new(vec![test_patient(), test_doctor()]),
        &mailer,
        &clock,
    );
    let mut session = SessionContext::new(clock.now());

    uc.execute(&mut session, input(Role::Patient, PATIENT_EMAIL, PASSWORD))
        .await
        .unwrap();
    uc.execute(&mut session, input(Role::Doctor, DOCTOR_ID, PASSWORD))
        .await
        .unwrap();

    let challenge = session.pending_challenge().unwrap();
    assert_eq!(challenge.target_email, test_doctor().user.email);
}
