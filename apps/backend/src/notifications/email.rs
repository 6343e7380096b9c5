//! Mail-API-backed notification dispatcher.
//!
//! Sends HTML mail through a Resend-style HTTP API. The dispatcher owns its
//! rate limiter; callers never observe partial mail failures as submission
//! errors.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use super::rate_limit::EmailRateLimiter;
use super::{templates, DispatchError, NotificationDispatcher, StoryComplete, TurnNotification};
use crate::config::email::EmailConfig;

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

pub struct EmailDispatcher {
    http: reqwest::Client,
    config: EmailConfig,
    limiter: EmailRateLimiter,
}

impl EmailDispatcher {
    pub fn new(config: EmailConfig) -> Self {
        Self::with_limiter(config, EmailRateLimiter::default())
    }

    pub fn with_limiter(config: EmailConfig, limiter: EmailRateLimiter) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            limiter,
        }
    }

    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), DispatchError> {
        if !self.limiter.check(recipient) {
            return Err(DispatchError::RateLimited(recipient.to_string()));
        }

        let payload = OutgoingEmail {
            from: &self.config.from,
            to: [recipient],
            subject,
            html,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Http(format!(
                "mail API returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for EmailDispatcher {
    async fn send_turn_notification(&self, note: TurnNotification) -> Result<(), DispatchError> {
        let (subject, html) = templates::turn_notification_email(&note, &self.config.frontend_url);
        self.send_email(&note.next_participant_email, &subject, &html)
            .await?;

        info!(
            game_id = note.game_id,
            next_participant_id = note.next_participant_id,
            turn_number = note.turn_number,
            "turn notification email sent"
        );
        Ok(())
    }

    async fn send_story_complete(&self, note: StoryComplete) -> Result<(), DispatchError> {
        let (subject, html) = templates::story_complete_email(&note);

        let mut failed = 0usize;
        for recipient in &note.recipients {
            if let Err(e) = self.send_email(recipient, &subject, &html).await {
                warn!(game_id = note.game_id, error = %e, "story complete email failed");
                failed += 1;
            }
        }

        let sent = note.recipients.len() - failed;
        info!(
            game_id = note.game_id,
            sent, failed, "story complete emails dispatched"
        );

        if sent == 0 && !note.recipients.is_empty() {
            return Err(DispatchError::Http(
                "all story complete emails failed".to_string(),
            ));
        }
        Ok(())
    }
}
