//! HTTP mail relay client.
//!
//! Posts a JSON message to a configured relay endpoint that owns SMTP
//! (or a hosted mail API). Anything but a 2xx answer is a delivery
//! failure and propagates so the caller can roll back reset state.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use askhub_core::config::mail::MailConfig;
use askhub_core::error::AppError;
use askhub_core::result::AppResult;
use askhub_core::traits::Mailer;

/// Message body posted to the relay endpoint.
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    text: String,
}

/// Mailer that delivers through an HTTP relay.
#[derive(Debug, Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from_address: String,
}

impl RelayMailer {
    /// Creates a relay mailer from mail configuration.
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        if config.relay_url.trim().is_empty() {
            return Err(AppError::configuration(
                "mail.relay_url must be set for the relay provider",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build mail client: {e}")))?;

        Ok(Self {
            client,
            relay_url: config.relay_url.clone(),
            from_address: config.from_address.clone(),
        })
    }
}

/// Subject line for a reset mail with the configured validity window.
fn reset_subject(valid_minutes: i64) -> String {
    format!("Your password reset token (valid for {valid_minutes} minutes)")
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send_password_reset(
        &self,
        recipient_name: &str,
        email: &str,
        reset_url: &str,
        valid_minutes: i64,
    ) -> AppResult<()> {
        let message = RelayMessage {
            from: &self.from_address,
            to: email,
            subject: reset_subject(valid_minutes),
            text: format!(
                "Hi {recipient_name},\n\n\
                 Forgot your password? Open the link below to set a new one:\n\n\
                 {reset_url}\n\n\
                 If you didn't forget your password, please ignore this email."
            ),
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    askhub_core::ErrorKind::Delivery,
                    format!("Mail relay request failed: {e}"),
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::delivery(format!(
                "Mail relay answered {}",
                response.status()
            )));
        }

        debug!(to = %email, "Password reset mail accepted by relay");
        Ok(())
    }
}
