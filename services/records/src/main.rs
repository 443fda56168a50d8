use sea_orm::Database;
use tracing::info;

use medrec_core::config::Config;
use medrec_core::tracing::init_tracing;
use medrec_records::config::RecordsConfig;
use medrec_records::router::build_router;
use medrec_records::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecordsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.records_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("records service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
