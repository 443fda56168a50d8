use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, SqlErr,
};

use medrec_auth_schema::{doctors, patients};
use medrec_domain::id::AccountId;
use medrec_domain::role::Role;
use medrec_domain::streak::HealthStreak;

use crate::domain::repository::{CredentialStore, StreakRepository};
use crate::domain::types::{AuthenticatedUser, NewDoctor, NewPatient, RoleProfile, StoredCredential};
use crate::error::{AuthServiceError, DbResultExt, db_error};

// ── Credential store ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCredentialStore {
    pub db: DatabaseConnection,
}

impl CredentialStore for DbCredentialStore {
    async fn find_by_identifier(
        &self,
        role: Role,
        identifier: &str,
    ) -> Result<Option<StoredCredential>, AuthServiceError> {
        match role {
            Role::Patient => {
                let model = patients::Entity::find()
                    .filter(
                        Condition::any()
                            .add(patients::Column::PatientId.eq(identifier))
                            .add(patients::Column::Email.eq(identifier)),
                    )
                    .one(&self.db)
                    .await
                    .store_context("find patient credential")?;
                model.map(patient_credential).transpose()
            }
            Role::Doctor => {
                let model = doctors::Entity::find()
                    .filter(
                        Condition::any()
                            .add(doctors::Column::DoctorId.eq(identifier))
                            .add(doctors::Column::Email.eq(identifier)),
                    )
                    .one(&self.db)
                    .await
                    .store_context("find doctor credential")?;
                model.map(doctor_credential).transpose()
            }
        }
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<(), AuthServiceError> {
        patients::ActiveModel {
            patient_id: Set(patient.id.as_str().to_owned()),
            first_name: Set(patient.first_name.clone()),
            last_name: Set(patient.last_name.clone()),
            email: Set(patient.email.clone()),
            password_hash: Set(patient.password_hash.clone()),
            password_salt: Set(patient.password_salt.clone()),
            phone: Set(patient.phone.clone()),
            date_of_birth: Set(patient.date_of_birth),
            gender: Set(Some(patient.gender.as_str().to_owned())),
            blood_group: Set(Some(patient.blood_group.as_str().to_owned())),
            address: Set(patient.address.clone()),
            emergency_contact: Set(patient.emergency_contact.clone()),
            emergency_phone: Set(patient.emergency_phone.clone()),
            insurance_provider: Set(patient.insurance_provider.clone()),
            insurance_number: Set(patient.insurance_number.clone()),
            height_cm: Set(patient.height_cm),
            weight_kg: Set(patient.weight_kg),
            qr_token: Set(patient.qr_token.clone()),
            last_login: Set(None),
            health_streak: Set(0),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| insert_error(e, "insert patient"))?;
        Ok(())
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<(), AuthServiceError> {
        doctors::ActiveModel {
            doctor_id: Set(doctor.id.as_str().to_owned()),
            first_name: Set(doctor.first_name.clone()),
            last_name: Set(doctor.last_name.clone()),
            email: Set(doctor.email.clone()),
            password_hash: Set(doctor.password_hash.clone()),
            password_salt: Set(doctor.password_salt.clone()),
            phone: Set(doctor.phone.clone()),
            license_number: Set(doctor.license_number.clone()),
            specialization: Set(doctor.specialization.clone()),
            hospital: Set(doctor.hospital.clone()),
            experience_years: Set(doctor.experience_years),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| insert_error(e, "insert doctor"))?;
        Ok(())
    }
}

fn insert_error(e: DbErr, what: &'static str) -> AuthServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return AuthServiceError::AccountAlreadyExists;
    }
    db_error(e, what)
}

fn patient_credential(m: patients::Model) -> Result<StoredCredential, AuthServiceError> {
    let id: AccountId = m.patient_id.parse().context("stored patient id")?;
    Ok(StoredCredential {
        user: AuthenticatedUser {
            id,
            display_name: Role::Patient.display_name(&m.first_name, &m.last_name),
            email: m.email,
            profile: RoleProfile::Patient {
                phone: m.phone,
                blood_group: m
                    .blood_group
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
                qr_token: m.qr_token,
                health_streak: u32::try_from(m.health_streak).unwrap_or(0),
            },
        },
        password_hash: m.password_hash,
        password_salt: m.password_salt,
    })
}

fn doctor_credential(m: doctors::Model) -> Result<StoredCredential, AuthServiceError> {
    let id: AccountId = m.doctor_id.parse().context("stored doctor id")?;
    Ok(StoredCredential {
        user: AuthenticatedUser {
            id,
            display_name: Role::Doctor.display_name(&m.first_name, &m.last_name),
            email: m.email,
            profile: RoleProfile::Doctor {
                specialization: m.specialization,
                hospital: m.hospital,
            },
        },
        password_hash: m.password_hash,
        password_salt: m.password_salt,
    })
}

// ── Health streak ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStreakRepository {
    pub db: DatabaseConnection,
}

impl StreakRepository for DbStreakRepository {
    async fn get(&self, patient_id: &AccountId) -> Result<Option<HealthStreak>, AuthServiceError> {
        let row: Option<(i32, Option<NaiveDate>)> = patients::Entity::find_by_id(patient_id.as_str())
            .select_only()
            .column(patients::Column::HealthStreak)
            .column(patients::Column::LastLogin)
            .into_tuple()
            .one(&self.db)
            .await
            .store_context("read health streak")?;
        Ok(row.map(|(count, last_login)| HealthStreak {
            count: u32::try_from(count).unwrap_or(0),
            last_login,
        }))
    }

    async fn save(
        &self,
        patient_id: &AccountId,
        streak: &HealthStreak,
    ) -> Result<(), AuthServiceError> {
        let count = i32::try_from(streak.count).unwrap_or(i32::MAX);
        patients::Entity::update_many()
            .col_expr(patients::Column::HealthStreak, Expr::value(count))
            .col_expr(patients::Column::LastLogin, Expr::value(streak.last_login))
            .filter(patients::Column::PatientId.eq(patient_id.as_str()))
            .exec(&self.db)
            .await
            .store_context("write health streak")?;
        Ok(())
    }
}
