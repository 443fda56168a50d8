use medrec_auth::domain::session::{AuthState, SessionContext};
use medrec_auth::domain::types::RoleProfile;
use medrec_auth::error::AuthServiceError;
use medrec_auth::usecase::login::{LoginInput, SubmitCredentialsUseCase};
use medrec_auth::usecase::otp::{ResendOtpUseCase, VerifyOtpOutput, VerifyOtpUseCase};
use medrec_auth::usecase::streak::HealthStreakTracker;
use medrec_core::clock::Clock;
use medrec_domain::role::Role;
use medrec_domain::streak::HealthStreak;
use medrec_testing::clock::ManualClock;

use crate::helpers::{
    DOCTOR_ID, MockCredentialStore, MockMailer, MockStreakRepo, PASSWORD, PATIENT_EMAIL,
    PATIENT_ID, clock, day, issuer, test_doctor, test_patient, wrong_code,
};

struct Harness {
    clock: ManualClock,
    mailer: MockMailer,
    streaks: MockStreakRepo,
    session: SessionContext,
}

impl Harness {
    fn new(streaks: MockStreakRepo) -> Self {
        let clock = clock();
        Self {
            session: SessionContext::new(clock.now()),
            clock,
            mailer: MockMailer::default(),
            streaks,
        }
    }

    async fn login(&mut self, role: Role, identifier: &str) {
        let uc = SubmitCredentialsUseCase {
            credentials: MockCredentialStore::new(vec![test_patient(), test_doctor()]),
            otp: issuer(&self.mailer),
            clock: self.clock.clone(),
        };
        uc.execute(
            &mut self.session,
            LoginInput {
                role,
                identifier: identifier.to_owned(),
                password: PASSWORD.to_owned(),
            },
        )
        .await
        .unwrap();
    }

    async fn verify(&mut self, code: &str) -> Result<VerifyOtpOutput, AuthServiceError> {
        let uc = VerifyOtpUseCase {
            streaks: HealthStreakTracker {
                streaks: self.streaks.clone(),
            },
            clock: self.clock.clone(),
        };
        uc.execute(&mut self.session, code).await
    }

    async fn resend(&mut self) -> Result<(), AuthServiceError> {
        let uc = ResendOtpUseCase {
            otp: issuer(&self.mailer),
            clock: self.clock.clone(),
        };
        uc.execute(&mut self.session).await.map(|_| ())
    }
}

#[tokio::test]
async fn should_log_patient_in_and_start_streak() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    h.clock.advance_secs(42);

    let code = h.mailer.last_code();
    let out = h.verify(&code).await.unwrap();

    match out {
        VerifyOtpOutput::LoggedIn {
            user,
            message,
            streak_notice,
        } => {
            assert_eq!(user.id.as_str(), PATIENT_ID);
            assert_eq!(message, "Welcome back, Ada Lovelace!");
            assert_eq!(
                streak_notice.as_deref(),
                Some("🔥 Health Streak: 1 days! Keep it up!")
            );
            assert!(matches!(
                user.profile,
                RoleProfile::Patient { health_streak: 1, .. }
            ));
        }
        other => panic!("expected LoggedIn, got {other:?}"),
    }
    assert_eq!(
        h.streaks.stored(PATIENT_ID),
        Some(HealthStreak {
            count: 1,
            last_login: Some(day(2024, 6, 10)),
        })
    );
    assert!(matches!(h.session.auth, AuthState::Authenticated(_)));
}

#[tokio::test]
async fn should_succeed_only_once_per_code() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    h.verify(&code).await.unwrap();
    let again = h.verify(&code).await;

    assert!(
        matches!(again, Err(AuthServiceError::NoPendingChallenge)),
        "expected NoPendingChallenge, got {again:?}"
    );
}

#[tokio::test]
async fn should_expire_at_301_seconds_without_consuming_attempts() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    h.clock.advance_secs(301);
    let result = h.verify(&code).await;

    assert!(
        matches!(result, Err(AuthServiceError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    let challenge = h.session.pending_challenge().unwrap();
    assert_eq!(challenge.attempts_used, 0);
    assert!(matches!(h.session.auth, AuthState::OtpPending(_)));

    // A second late submission is still reported as expired and still free.
    let result = h.verify("000000").await;
    assert!(
        matches!(result, Err(AuthServiceError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    let challenge = h.session.pending_challenge().unwrap();
    assert_eq!(challenge.attempts_left(), 3);
    assert!(matches!(h.session.auth, AuthState::OtpPending(_)));
}

#[tokio::test]
async fn should_accept_code_at_exactly_300_seconds() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    h.clock.advance_secs(300);
    assert!(h.verify(&code).await.is_ok());
}

#[tokio::test]
async fn should_count_down_attempts_then_exhaust() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();
    let wrong = wrong_code(&code);

    let first = h.verify(&wrong).await.unwrap_err();
    assert!(matches!(first, AuthServiceError::OtpMismatch { attempts_left: 2 }));
    assert_eq!(first.to_string(), "incorrect OTP, 2 attempts left");

    let second = h.verify(&wrong).await.unwrap_err();
    assert!(matches!(second, AuthServiceError::OtpMismatch { attempts_left: 1 }));
    assert_eq!(second.to_string(), "incorrect OTP, 1 attempt left");

    let third = h.verify(&wrong).await.unwrap_err();
    assert!(matches!(third, AuthServiceError::OtpAttemptsExhausted));

    // Even the right code is gone now.
    let fourth = h.verify(&code).await.unwrap_err();
    assert!(matches!(fourth, AuthServiceError::NoPendingChallenge));

    // A resend revives the challenge.
    h.resend().await.unwrap();
    let fresh = h.mailer.last_code();
    assert!(h.verify(&fresh).await.is_ok());
}

#[tokio::test]
async fn should_not_consume_attempts_on_malformed_input() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;

    for input in ["", "12345", "abcdef", "1234567"] {
        let result = h.verify(input).await;
        assert!(matches!(result, Err(AuthServiceError::OtpMalformed)));
    }
    assert_eq!(h.session.pending_challenge().unwrap().attempts_left(), 3);
}

#[tokio::test]
async fn should_invalidate_previous_code_on_resend() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let old = h.mailer.last_code();

    h.clock.advance_secs(250);
    h.resend().await.unwrap();
    let new = h.mailer.last_code();
    assert_eq!(h.mailer.sent_count(), 2);

    if old != new {
        let result = h.verify(&old).await;
        assert!(
            matches!(result, Err(AuthServiceError::OtpMismatch { attempts_left: 2 })),
            "expected mismatch for old code, got {result:?}"
        );
    }

    // The new code has its own 300s window.
    h.clock.advance_secs(200);
    assert!(h.verify(&new).await.is_ok());
}

#[tokio::test]
async fn should_keep_old_code_when_resend_fails() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    let uc = ResendOtpUseCase {
        otp: issuer(&MockMailer::failing("quota exceeded")),
        clock: h.clock.clone(),
    };
    let result = uc.execute(&mut h.session).await;
    assert!(matches!(result, Err(AuthServiceError::OtpDispatchFailed(_))));

    assert!(h.verify(&code).await.is_ok());
}

#[tokio::test]
async fn should_refuse_resend_without_pending_challenge() {
    let mut h = Harness::new(MockStreakRepo::default());
    let result = h.resend().await;
    assert!(matches!(result, Err(AuthServiceError::NoPendingChallenge)));
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn should_leave_streaks_alone_for_doctors() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Doctor, DOCTOR_ID).await;
    let code = h.mailer.last_code();

    match h.verify(&code).await.unwrap() {
        VerifyOtpOutput::LoggedIn {
            message,
            streak_notice,
            ..
        } => {
            assert_eq!(message, "Welcome back, Dr. Gregory House!");
            assert_eq!(streak_notice, None);
        }
        other => panic!("expected LoggedIn, got {other:?}"),
    }
    assert!(h.streaks.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_log_in_with_zero_streak_when_streak_store_fails() {
    let mut h = Harness::new(MockStreakRepo::unavailable());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    match h.verify(&code).await.unwrap() {
        VerifyOtpOutput::LoggedIn {
            user,
            streak_notice,
            ..
        } => {
            assert_eq!(streak_notice, None);
            assert!(matches!(
                user.profile,
                RoleProfile::Patient { health_streak: 0, .. }
            ));
        }
        other => panic!("expected LoggedIn, got {other:?}"),
    }
    assert!(matches!(h.session.auth, AuthState::Authenticated(_)));
}

#[tokio::test]
async fn should_continue_streak_from_yesterday() {
    let streaks = MockStreakRepo::with(
        PATIENT_ID,
        HealthStreak {
            count: 5,
            last_login: Some(day(2024, 6, 9)),
        },
    );
    let mut h = Harness::new(streaks);
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    match h.verify(&code).await.unwrap() {
        VerifyOtpOutput::LoggedIn { streak_notice, .. } => assert_eq!(
            streak_notice.as_deref(),
            Some("🔥 Health Streak: 6 days! Keep it up!")
        ),
        other => panic!("expected LoggedIn, got {other:?}"),
    }
}

#[tokio::test]
async fn should_cancel_pending_challenge() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    let code = h.mailer.last_code();

    h.session.cancel().unwrap();
    assert_eq!(h.session.auth, AuthState::Unauthenticated);

    let result = h.verify(&code).await;
    assert!(matches!(result, Err(AuthServiceError::NoPendingChallenge)));
}

#[tokio::test]
async fn should_report_status_while_pending() {
    let mut h = Harness::new(MockStreakRepo::default());
    h.login(Role::Patient, PATIENT_EMAIL).await;
    h.clock.advance_secs(61);
    let _ = h.verify("000000").await;

    let status = h.session.otp_status(h.clock.now()).unwrap();
    assert_eq!(status.target_email, PATIENT_EMAIL);
    assert_eq!(status.remaining_secs, 239);
    // "000000" is outside the generated range, so it always counts as a miss.
    assert_eq!(status.attempts_left, 2);
}
