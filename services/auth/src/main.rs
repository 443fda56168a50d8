use sea_orm::Database;
use tracing::info;

use medrec_auth::config::AuthConfig;
use medrec_auth::infra::mail::{HttpMailer, MailSettings};
use medrec_auth::router::build_router;
use medrec_auth::state::AppState;
use medrec_core::config::Config;
use medrec_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();
    let otp_template = config.otp_template().expect("invalid OTP template");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mail_settings = match (
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_sender.clone(),
    ) {
        (Some(api_url), Some(api_key), Some(sender)) => Some(MailSettings {
            api_url,
            api_key,
            sender,
        }),
        _ => {
            tracing::warn!("mail settings incomplete, OTP dispatch will fail");
            None
        }
    };
    let mailer = HttpMailer::new(mail_settings).expect("failed to build mail client");

    let state = AppState {
        db,
        redis,
        mailer,
        otp_template,
        cookie_domain: config.cookie_domain,
        session_ttl_secs: config.session_ttl_secs,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
