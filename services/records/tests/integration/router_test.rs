use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use sea_orm::DatabaseConnection;

use medrec_records::router::build_router;
use medrec_records::state::AppState;
use medrec_testing::auth::MockAuth;

// Role checks run before any query, so a disconnected database is enough for
// the authorization paths.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn as_user(mut request: TestRequest, auth: &MockAuth) -> TestRequest {
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request
}

#[tokio::test]
async fn should_answer_liveness() {
    server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    server()
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_require_identity_headers() {
    server()
        .get("/records/@me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_doctor_from_patient_routes() {
    let server = server();
    let resp = as_user(server.get("/records/@me"), &MockAuth::doctor()).await;
    resp.assert_status(StatusCode::FORBIDDEN);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "FORBIDDEN");

    as_user(server.get("/allergies/@me"), &MockAuth::doctor())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_forbid_patient_from_doctor_routes() {
    let server = server();
    as_user(server.get("/patients"), &MockAuth::patient())
        .await
        .assert_status(StatusCode::FORBIDDEN);
    as_user(server.get("/records/patients/PAT1A2B3C4D"), &MockAuth::patient())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_inverted_range_before_querying() {
    let server = server();
    let resp = as_user(
        server.get("/records/@me?from=2024-06-10&to=2024-06-01"),
        &MockAuth::patient(),
    )
    .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn should_reject_malformed_query() {
    let server = server();
    let resp = as_user(server.get("/records/@me?from=yesterday"), &MockAuth::patient()).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_serve_batch_template_to_doctors() {
    let server = server();
    let resp = as_user(server.get("/records/batch/template"), &MockAuth::doctor()).await;
    resp.assert_status_ok();
    assert_eq!(
        resp.header("content-type").to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    assert!(
        resp.header("content-disposition")
            .to_str()
            .unwrap()
            .starts_with("attachment;")
    );
    assert!(resp.text().starts_with("patient_id,visit_date,diagnosis"));

    as_user(server.get("/records/batch/template"), &MockAuth::patient())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_csv_upload_missing_required_columns() {
    let server = server();
    let resp = as_user(server.post("/records/batch/csv"), &MockAuth::doctor())
        .text("patient_id,diagnosis\nPAT1A2B3C4D,Flu\n")
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "INVALID_TEMPLATE");
    assert_eq!(json["message"], "missing required columns: visit_date");
}

#[tokio::test]
async fn should_forbid_patient_csv_upload() {
    let server = server();
    as_user(server.post("/records/batch/csv"), &MockAuth::patient())
        .text("patient_id,visit_date\n")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_header_only_csv_upload() {
    let server = server();
    let resp = as_user(server.post("/records/batch/csv"), &MockAuth::doctor())
        .text("patient_id,visit_date\n")
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_report_store_unavailable_for_emergency_lookup() {
    let resp = server()
        .get("/emergency/0123456789abcdef0123456789abcdef")
        .await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["kind"], "STORE_UNAVAILABLE");
}
