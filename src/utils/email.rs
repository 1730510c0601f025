use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

/// Out-of-band delivery channel for login codes.
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Sends a one-time login code to the given address.
    ///
    /// When SMTP is disabled (local development, tests) the send is skipped
    /// and the code is only visible in the store.
    #[instrument(skip(self, code))]
    pub async fn send_login_code(&self, to_email: &str, code: &str) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(email = %to_email, "SMTP disabled, skipping login code delivery");
            return Ok(());
        }

        let text_body = format!(
            "Your Gradebook login code is: {}\n\n\
             It expires in 10 minutes. If you didn't request this code, you \
             can ignore this email.",
            code
        );
        let html_body = format!(
            "<p>Your Gradebook login code is:</p>\
             <p style=\"font-size: 24px; font-weight: bold; letter-spacing: 2px;\">{}</p>\
             <p>It expires in 10 minutes. If you didn't request this code, you \
             can ignore this email.</p>",
            code
        );

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow::anyhow!("invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow::anyhow!("invalid to email: {}", e)))?)
            .subject("Your Gradebook login code")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal(anyhow::anyhow!("failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to send email: {}", e)))?;

        Ok(())
    }
}
