//! # askhub-mailer
//!
//! Mail delivery backends implementing the core [`Mailer`] trait:
//! an HTTP relay client for deployments and a tracing-only mailer for
//! development.
//!
//! [`Mailer`]: askhub_core::traits::Mailer

pub mod log;
pub mod relay;

use std::sync::Arc;

use askhub_core::config::mail::MailConfig;
use askhub_core::error::AppError;
use askhub_core::traits::Mailer;

pub use log::LogMailer;
pub use relay::RelayMailer;

/// Build the configured mail backend.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match config.provider.as_str() {
        "relay" => Ok(Arc::new(RelayMailer::new(config)?)),
        "log" => Ok(Arc::new(LogMailer::new(config))),
        other => Err(AppError::configuration(format!(
            "Unknown mail provider: '{other}'. Expected one of: relay, log"
        ))),
    }
}
