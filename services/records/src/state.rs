use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAllergyRepository, DbDirectoryRepository, DbRecordRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn record_repo(&self) -> DbRecordRepository {
        DbRecordRepository {
            db: self.db.clone(),
        }
    }

    pub fn allergy_repo(&self) -> DbAllergyRepository {
        DbAllergyRepository {
            db: self.db.clone(),
        }
    }

    pub fn directory_repo(&self) -> DbDirectoryRepository {
        DbDirectoryRepository {
            db: self.db.clone(),
        }
    }
}
