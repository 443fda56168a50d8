use chrono::NaiveDate;
use serde::Deserialize;

use medrec_core::clock::Clock;
use medrec_domain::id::{AccountId, generate_qr_token};
use medrec_domain::medical::{BloodGroup, Gender};
use medrec_domain::role::Role;

use crate::domain::password::{hash_password, new_salt};
use crate::domain::repository::{CredentialStore, OtpMailer};
use crate::domain::session::{PendingAction, SessionContext};
use crate::domain::types::{NewDoctor, NewPatient, OTP_TTL_SECS, RegisteredAccount};
use crate::error::AuthServiceError;
use crate::usecase::issuer::OtpIssuer;
use crate::usecase::login::OtpIssued;

/// Patient sign-up form. Required fields default to empty so that a missing
/// field is reported as `InvalidRegistration` rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoctorRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub experience_years: Option<i32>,
}

fn required(value: &str, field: &str) -> Result<String, AuthServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AuthServiceError::InvalidRegistration(format!(
            "{field} is required"
        )));
    }
    Ok(value.to_owned())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn check_password(password: &str, confirm: &str) -> Result<(), AuthServiceError> {
    if password.is_empty() {
        return Err(AuthServiceError::InvalidRegistration(
            "password is required".to_owned(),
        ));
    }
    if password != confirm {
        return Err(AuthServiceError::InvalidRegistration(
            "passwords do not match".to_owned(),
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<String, AuthServiceError> {
    let email = required(email, "email")?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthServiceError::InvalidRegistration(
            "email is invalid".to_owned(),
        )),
    }
}

fn non_negative<T: PartialOrd + Default>(
    value: Option<T>,
    field: &str,
) -> Result<Option<T>, AuthServiceError> {
    match value {
        Some(v) if v < T::default() => Err(AuthServiceError::InvalidRegistration(format!(
            "{field} must not be negative"
        ))),
        other => Ok(other),
    }
}

impl PatientRegistration {
    fn into_new_patient(self) -> Result<NewPatient, AuthServiceError> {
        let first_name = required(&self.first_name, "first_name")?;
        let last_name = required(&self.last_name, "last_name")?;
        let email = check_email(&self.email)?;
        check_password(&self.password, &self.confirm_password)?;

        let salt = new_salt();
        Ok(NewPatient {
            id: AccountId::generate(Role::Patient),
            first_name,
            last_name,
            email,
            password_hash: hash_password(&self.password, &salt),
            password_salt: salt,
            phone: optional(self.phone),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            blood_group: self.blood_group,
            address: optional(self.address),
            emergency_contact: optional(self.emergency_contact),
            emergency_phone: optional(self.emergency_phone),
            insurance_provider: optional(self.insurance_provider),
            insurance_number: optional(self.insurance_number),
            height_cm: non_negative(self.height_cm, "height_cm")?,
            weight_kg: non_negative(self.weight_kg, "weight_kg")?,
            qr_token: generate_qr_token(),
        })
    }
}

impl DoctorRegistration {
    fn into_new_doctor(self) -> Result<NewDoctor, AuthServiceError> {
        let first_name = required(&self.first_name, "first_name")?;
        let last_name = required(&self.last_name, "last_name")?;
        let email = check_email(&self.email)?;
        let license_number = required(&self.license_number, "license_number")?;
        check_password(&self.password, &self.confirm_password)?;

        let salt = new_salt();
        Ok(NewDoctor {
            id: AccountId::generate(Role::Doctor),
            first_name,
            last_name,
            email,
            password_hash: hash_password(&self.password, &salt),
            password_salt: salt,
            phone: optional(self.phone),
            license_number,
            specialization: optional(self.specialization),
            hospital: optional(self.hospital),
            experience_years: non_negative(self.experience_years, "experience_years")?,
        })
    }
}

/// Issue the confirmation code for a freshly created account.
///
/// The account row is already committed; a dispatch failure leaves it in
/// place and surfaces the error.
async fn challenge_registration<M, K>(
    otp: &OtpIssuer<M>,
    clock: &K,
    session: &mut SessionContext,
    account: RegisteredAccount,
) -> Result<OtpIssued, AuthServiceError>
where
    M: OtpMailer,
    K: Clock,
{
    let target_email = account.email.clone();
    let code = otp.issue(&target_email).await?;
    session.begin_challenge(
        target_email.clone(),
        PendingAction::Register(account),
        code,
        clock.now(),
    )?;
    Ok(OtpIssued {
        target_email,
        expires_in_secs: OTP_TTL_SECS,
    })
}

pub struct RegisterPatientUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub credentials: C,
    pub otp: OtpIssuer<M>,
    pub clock: K,
}

impl<C, M, K> RegisterPatientUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub async fn execute(
        &self,
        session: &mut SessionContext,
        form: PatientRegistration,
    ) -> Result<OtpIssued, AuthServiceError> {
        session.ensure_not_authenticated()?;
        let patient = form.into_new_patient()?;
        self.credentials.create_patient(&patient).await?;
        tracing::info!(account_id = %patient.id, "patient registered");

        let account = RegisteredAccount {
            display_name: Role::Patient.display_name(&patient.first_name, &patient.last_name),
            id: patient.id,
            email: patient.email,
        };
        challenge_registration(&self.otp, &self.clock, session, account).await
    }
}

pub struct RegisterDoctorUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub credentials: C,
    pub otp: OtpIssuer<M>,
    pub clock: K,
}

impl<C, M, K> RegisterDoctorUseCase<C, M, K>
where
    C: CredentialStore,
    M: OtpMailer,
    K: Clock,
{
    pub async fn execute(
        &self,
        session: &mut SessionContext,
        form: DoctorRegistration,
    ) -> Result<OtpIssued, AuthServiceError> {
        session.ensure_not_authenticated()?;
        let doctor = form.into_new_doctor()?;
        self.credentials.create_doctor(&doctor).await?;
        tracing::info!(account_id = %doctor.id, "doctor registered");

        let account = RegisteredAccount {
            display_name: Role::Doctor.display_name(&doctor.first_name, &doctor.last_name),
            id: doctor.id,
            email: doctor.email,
        };
        challenge_registration(&self.otp, &self.clock, session, account).await
    }
}
