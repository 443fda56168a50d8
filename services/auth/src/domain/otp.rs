use std::fmt;

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::error::AuthServiceError;
use crate::domain::password::constant_time_eq;

pub const OTP_LEN: usize = 6;

/// Six-digit one-time code. `Debug` never prints the digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Uniform in 100000..=999999 from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        Self(rng.random_range(100_000u32..=999_999).to_string())
    }

    /// Accept user input only if it is exactly six ASCII digits.
    pub fn parse_input(input: &str) -> Result<Self, AuthServiceError> {
        if input.len() == OTP_LEN && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_owned()))
        } else {
            Err(AuthServiceError::OtpMalformed)
        }
    }

    pub fn matches(&self, other: &OtpCode) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

impl From<&str> for OtpCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Subject and body of the OTP email. The body contains an `{otp}` placeholder.
#[derive(Debug, Clone)]
pub struct OtpTemplate {
    pub subject: String,
    pub body: String,
}

pub const DEFAULT_OTP_SUBJECT: &str = "E-Medical Record System - OTP Verification";
pub const DEFAULT_OTP_MESSAGE: &str = "Your OTP for E-Medical Record System verification is: {otp}\n\nThis OTP will expire in 5 minutes.\n\nIf you didn't request this OTP, please ignore this email.";

impl Default for OtpTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_OTP_SUBJECT.to_owned(),
            body: DEFAULT_OTP_MESSAGE.to_owned(),
        }
    }
}

impl OtpTemplate {
    pub fn render(&self, to: &str, code: &OtpCode) -> OtpMessage {
        OtpMessage {
            to: to.to_owned(),
            subject: self.subject.clone(),
            text: self.body.replace("{otp}", code.as_str()),
        }
    }
}

/// Outbound email carrying a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}
