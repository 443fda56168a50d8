use serde::Serialize;

use crate::domain::otp::OtpMessage;
use crate::domain::repository::OtpMailer;
use crate::error::AuthServiceError;

/// Endpoint and credentials of the mail API.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
}

/// Sends OTP emails through an HTTP mail API.
///
/// With no settings every send fails with `OtpDispatchFailed`, mirroring a
/// deployment that has not been given email credentials.
#[derive(Clone)]
pub struct HttpMailer {
    pub client: reqwest::Client,
    pub settings: Option<MailSettings>,
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(settings: Option<MailSettings>) -> anyhow::Result<Self> {
        use anyhow::Context as _;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client, settings })
    }
}

impl OtpMailer for HttpMailer {
    async fn send(&self, message: &OtpMessage) -> Result<(), AuthServiceError> {
        let Some(settings) = &self.settings else {
            return Err(AuthServiceError::OtpDispatchFailed(
                "email credentials not configured".to_owned(),
            ));
        };

        let request = SendMailRequest {
            from: &settings.sender,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let result = self
            .client
            .post(&settings.api_url)
            .bearer_auth(&settings.api_key)
            .json(&request)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(to = %message.to, error = %e, "OTP email dispatch failed");
                Err(AuthServiceError::OtpDispatchFailed(e.to_string()))
            }
        }
    }
}
