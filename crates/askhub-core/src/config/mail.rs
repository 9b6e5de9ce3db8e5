//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Mail delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Delivery provider: `"relay"` (HTTP relay) or `"log"` (development).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// HTTP mail relay endpoint (used by the `relay` provider).
    #[serde(default)]
    pub relay_url: String,
    /// Sender address placed on outgoing mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Base URL the reset token is appended to when building reset links.
    #[serde(default = "default_reset_url_base")]
    pub reset_url_base: String,
    /// Request timeout for the relay call in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from() -> String {
    "noreply@askhub.local".to_string()
}

fn default_reset_url_base() -> String {
    "http://localhost:8080/api/auth/reset-password".to_string()
}

fn default_timeout() -> u64 {
    10
}
