use crate::domain::otp::{OtpCode, OtpTemplate};
use crate::domain::repository::OtpMailer;
use crate::error::AuthServiceError;

/// Generates a code and mails it. The code is returned only once the
/// transport has accepted the message.
pub struct OtpIssuer<M>
where
    M: OtpMailer,
{
    pub mailer: M,
    pub template: OtpTemplate,
}

impl<M> OtpIssuer<M>
where
    M: OtpMailer,
{
    pub async fn issue(&self, to: &str) -> Result<OtpCode, AuthServiceError> {
        let code = OtpCode::generate();
        let message = self.template.render(to, &code);
        self.mailer.send(&message).await?;
        Ok(code)
    }
}
