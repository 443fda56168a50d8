use medrec_auth::usecase::streak::HealthStreakTracker;
use medrec_domain::id::AccountId;
use medrec_domain::streak::HealthStreak;

use crate::helpers::{MockStreakRepo, PATIENT_ID, day};

fn patient() -> AccountId {
    PATIENT_ID.parse().unwrap()
}

async fn login_on_june_10(previous: Option<HealthStreak>) -> (u32, MockStreakRepo) {
    let repo = match previous {
        Some(streak) => MockStreakRepo::with(PATIENT_ID, streak),
        None => MockStreakRepo::default(),
    };
    let tracker = HealthStreakTracker {
        streaks: repo.clone(),
    };
    let count = tracker
        .record_login(&patient(), day(2024, 6, 10))
        .await
        .unwrap();
    (count, repo)
}

#[tokio::test]
async fn should_start_at_one_for_first_login() {
    let (count, repo) = login_on_june_10(None).await;
    assert_eq!(count, 1);
    assert_eq!(
        repo.stored(PATIENT_ID),
        Some(HealthStreak {
            count: 1,
            last_login: Some(day(2024, 6, 10)),
        })
    );
}

#[tokio::test]
async fn should_extend_streak_from_yesterday() {
    let (count, _) = login_on_june_10(Some(HealthStreak {
        count: 5,
        last_login: Some(day(2024, 6, 9)),
    }))
    .await;
    assert_eq!(count, 6);
}

#[tokio::test]
async fn should_reset_after_gap() {
    let (count, repo) = login_on_june_10(Some(HealthStreak {
        count: 5,
        last_login: Some(day(2024, 6, 8)),
    }))
    .await;
    assert_eq!(count, 1);
    assert_eq!(repo.stored(PATIENT_ID).unwrap().last_login, Some(day(2024, 6, 10)));
}

#[tokio::test]
async fn should_hold_on_same_day() {
    let (count, _) = login_on_june_10(Some(HealthStreak {
        count: 3,
        last_login: Some(day(2024, 6, 10)),
    }))
    .await;
    assert_eq!(count, 3);
}

#[tokio::test]
async fn should_be_idempotent_within_a_day() {
    let repo = MockStreakRepo::with(
        PATIENT_ID,
        HealthStreak {
            count: 2,
            last_login: Some(day(2024, 6, 9)),
        },
    );
    let tracker = HealthStreakTracker {
        streaks: repo.clone(),
    };
    let today = day(2024, 6, 10);

    let first = tracker.record_login(&patient(), today).await.unwrap();
    let second = tracker.record_login(&patient(), today).await.unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 3);
}
