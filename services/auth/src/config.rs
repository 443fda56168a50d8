use serde::Deserialize;

use medrec_core::config::Config;

use crate::domain::otp::{DEFAULT_OTP_MESSAGE, DEFAULT_OTP_SUBJECT, OtpTemplate};

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL for session contexts.
    pub redis_url: String,
    /// TCP port to listen on. Env var: `AUTH_PORT`.
    #[serde(default = "default_port")]
    pub auth_port: u16,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Session context lifetime in Redis and cookie max-age.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Mail API endpoint. OTP dispatch fails while any mail setting is unset.
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    /// `from` address of OTP emails.
    pub mail_sender: Option<String>,
    #[serde(default = "default_otp_subject")]
    pub otp_subject: String,
    /// Body template; `{otp}` is replaced with the code.
    #[serde(default = "default_otp_message")]
    pub otp_message: String,
}

impl Config for AuthConfig {}

fn default_port() -> u16 {
    3112
}

fn default_session_ttl() -> u64 {
    86_400
}

fn default_otp_subject() -> String {
    DEFAULT_OTP_SUBJECT.to_owned()
}

fn default_otp_message() -> String {
    DEFAULT_OTP_MESSAGE.to_owned()
}

impl AuthConfig {
    pub fn otp_template(&self) -> anyhow::Result<OtpTemplate> {
        if !self.otp_message.contains("{otp}") {
            anyhow::bail!("OTP_MESSAGE must contain the {{otp}} placeholder");
        }
        Ok(OtpTemplate {
            subject: self.otp_subject.clone(),
            body: self.otp_message.clone(),
        })
    }
}
