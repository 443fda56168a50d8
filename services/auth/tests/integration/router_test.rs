use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use medrec_auth::domain::otp::OtpTemplate;
use medrec_auth::infra::mail::HttpMailer;
use medrec_auth::router::build_router;
use medrec_auth::state::AppState;

// Redis pools connect lazily, and none of these requests carry a session
// cookie, so no backing service is needed.
fn server() -> TestServer {
    let redis = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        redis,
        mailer: HttpMailer::new(None).unwrap(),
        otp_template: OtpTemplate::default(),
        cookie_domain: "localhost".to_owned(),
        session_ttl_secs: 60,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness() {
    let resp = server().get("/healthz").await;
    resp.assert_status_ok();
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let resp = server().get("/readyz").await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_session_lookup_without_cookie() {
    let resp = server().get("/auth/session").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn should_clear_cookie_on_logout_without_session() {
    let resp = server().delete("/auth/session").await;
    resp.assert_status(StatusCode::NO_CONTENT);
    let cookie = resp.cookie("medrec_session");
    assert_eq!(cookie.value(), "");
}
