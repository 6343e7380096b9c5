//! Outbound email configuration.
//!
//! All values come from the runtime environment:
//! - `EMAIL_API_KEY`: bearer token for the mail API. When absent, the
//!   application falls back to a logging-only dispatcher.
//! - `EMAIL_API_URL`: mail API base URL.
//! - `EMAIL_FROM`: From header for outgoing mail.
//! - `FRONTEND_URL`: base URL used to build participation links.

use std::env;

const DEFAULT_API_URL: &str = "https://api.resend.com";
const DEFAULT_FROM: &str = "StoryChain <stories@storychain.app>";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub api_url: String,
    pub from: String,
    pub frontend_url: String,
}

impl EmailConfig {
    /// Load the email configuration from the environment.
    ///
    /// Returns `None` when `EMAIL_API_KEY` is not set (mail sending
    /// disabled; notifications are logged instead).
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("EMAIL_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }

        Some(Self {
            api_key,
            api_url: env::var("EMAIL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            from: env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_FROM.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
        })
    }
}
