//! Development mailer that only logs.

use async_trait::async_trait;
use tracing::{debug, info};

use askhub_core::config::mail::MailConfig;
use askhub_core::result::AppResult;
use askhub_core::traits::Mailer;

/// Mailer for local development: records the send in the log instead of
/// delivering anything. The reset link itself only appears at debug
/// level so default logs never carry a live token.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Creates a log mailer from mail configuration.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(
        &self,
        recipient_name: &str,
        email: &str,
        reset_url: &str,
        valid_minutes: i64,
    ) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %email,
            recipient = %recipient_name,
            valid_minutes,
            "Password reset mail (log provider, not delivered)"
        );
        debug!(reset_url = %reset_url, "Reset link");
        Ok(())
    }
}
