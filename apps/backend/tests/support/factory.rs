//! Factories for game fixtures.
//!
//! These go through `GameService::create_game`, exercising the production
//! creation path rather than raw ActiveModel inserts.

use backend::errors::domain::DomainError;
use backend::services::games::{CreatedGame, GameCreateRequest, GameService};
use backend_test_support::unique_helpers::unique_email;
use sea_orm::ConnectionTrait;

/// Create a game with the given participant emails (in turn order) and an
/// optional opening sentence.
pub async fn create_story_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    opening_sentence: Option<&str>,
    participant_emails: &[&str],
) -> Result<CreatedGame, DomainError> {
    let service = GameService::new();
    service
        .create_game(
            conn,
            GameCreateRequest {
                title: Some(title.to_string()),
                opening_sentence: opening_sentence.map(|s| s.to_string()),
                participant_emails: participant_emails.iter().map(|e| e.to_string()).collect(),
            },
        )
        .await
}

/// Three unique participant emails for the common 3-writer scenario.
pub fn three_writers(prefix: &str) -> (String, String, String) {
    (
        unique_email(&format!("{prefix}-a")),
        unique_email(&format!("{prefix}-b")),
        unique_email(&format!("{prefix}-c")),
    )
}
