//! Notification dispatch for turn hand-offs and completed stories.
//!
//! The Turn Coordinator builds a dispatch payload inside its transaction and
//! hands it to a `NotificationDispatcher` after commit. Dispatch failures are
//! logged by the caller and never affect the committed turn state.

pub mod email;
pub mod rate_limit;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::email::EmailConfig;

/// Payload for a "your turn" notification, addressed to the participant
/// whose turn_order equals the game's new current_turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnNotification {
    pub game_id: i64,
    pub game_title: Option<String>,
    pub next_participant_id: i64,
    pub next_participant_email: String,
    pub previous_sentence: String,
    pub turn_number: i16,
    pub max_participants: i16,
}

/// One entry of a completed story, in turn order.
#[derive(Debug, Clone, PartialEq)]
pub struct StorySentence {
    pub turn_number: i16,
    pub author_email: String,
    pub body: String,
}

/// Payload for the story-complete notification sent to every participant.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryComplete {
    pub game_id: i64,
    pub game_title: Option<String>,
    pub sentences: Vec<StorySentence>,
    pub recipients: Vec<String>,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch rate limit exceeded for {0}")]
    RateLimited(String),
    #[error("mail API error: {0}")]
    Http(String),
    #[error("dispatcher configuration error: {0}")]
    Config(String),
}

/// Fire-and-forget delivery seam between the Turn Coordinator and the
/// messaging system. Implementations must be safe to call from concurrent
/// request handlers.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_turn_notification(&self, note: TurnNotification) -> Result<(), DispatchError>;

    async fn send_story_complete(&self, note: StoryComplete) -> Result<(), DispatchError>;
}

/// Dispatcher used when no mail API key is configured: records the event in
/// the log and reports success.
#[derive(Debug, Default)]
pub struct LoggingDispatcher;

#[async_trait]
impl NotificationDispatcher for LoggingDispatcher {
    async fn send_turn_notification(&self, note: TurnNotification) -> Result<(), DispatchError> {
        info!(
            game_id = note.game_id,
            next_participant_id = note.next_participant_id,
            turn_number = note.turn_number,
            "turn notification (mail sending disabled)"
        );
        Ok(())
    }

    async fn send_story_complete(&self, note: StoryComplete) -> Result<(), DispatchError> {
        info!(
            game_id = note.game_id,
            sentences = note.sentences.len(),
            recipients = note.recipients.len(),
            "story complete notification (mail sending disabled)"
        );
        Ok(())
    }
}

/// Build the process dispatcher from the environment: an `EmailDispatcher`
/// when `EMAIL_API_KEY` is configured, otherwise a `LoggingDispatcher`.
pub fn dispatcher_from_env() -> Arc<dyn NotificationDispatcher> {
    match EmailConfig::from_env() {
        Some(config) => Arc::new(email::EmailDispatcher::new(config)),
        None => {
            info!("EMAIL_API_KEY not set; notifications will only be logged");
            Arc::new(LoggingDispatcher)
        }
    }
}
