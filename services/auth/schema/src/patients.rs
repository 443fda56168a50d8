use sea_orm::entity::prelude::*;

/// Patient account. Owns login credentials, profile fields shown on the
/// dashboard and emergency card, and the health streak counters.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Hex SHA-256 of `password_salt || password`.
    pub password_hash: String,
    /// Empty for rows created before salting; see `domain::password`.
    pub password_salt: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<f64>,
    #[sea_orm(unique)]
    pub qr_token: String,
    pub last_login: Option<chrono::NaiveDate>,
    pub health_streak: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
