use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use medrec_core::clock::SystemClock;

use crate::domain::otp::OtpTemplate;
use crate::infra::cache::RedisSessionStore;
use crate::infra::db::{DbCredentialStore, DbStreakRepository};
use crate::infra::mail::HttpMailer;
use crate::usecase::issuer::OtpIssuer;
use crate::usecase::streak::HealthStreakTracker;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub mailer: HttpMailer,
    pub otp_template: OtpTemplate,
    pub cookie_domain: String,
    pub session_ttl_secs: u64,
}

impl AppState {
    pub fn credential_store(&self) -> DbCredentialStore {
        DbCredentialStore {
            db: self.db.clone(),
        }
    }

    pub fn streak_tracker(&self) -> HealthStreakTracker<DbStreakRepository> {
        HealthStreakTracker {
            streaks: DbStreakRepository {
                db: self.db.clone(),
            },
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
            ttl_secs: self.session_ttl_secs,
        }
    }

    pub fn otp_issuer(&self) -> OtpIssuer<HttpMailer> {
        OtpIssuer {
            mailer: self.mailer.clone(),
            template: self.otp_template.clone(),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}
