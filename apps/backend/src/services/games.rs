//! Game lifecycle services: creation and story retrieval.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::games_sea::GameCreate;
use crate::adapters::sentences_sea::SentenceCreate;
use crate::domain::email::validate_email;
use crate::domain::{validate_sentence_body, OPENING_TURN};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::games::Game;
use crate::repos::participants::Participant;
use crate::repos::sentences::Sentence;
use crate::repos::{games, participants, sentences};
use crate::utils::share_code::generate_share_code;

/// Participant count bounds for a new game.
pub const MIN_PARTICIPANTS: usize = 2;
pub const MAX_PARTICIPANTS: usize = 10;

const SHARE_CODE_ATTEMPTS: usize = 3;

/// Request to create a game. Emails are listed in turn order; the first
/// entry is the host.
#[derive(Debug, Clone)]
pub struct GameCreateRequest {
    pub title: Option<String>,
    pub opening_sentence: Option<String>,
    pub participant_emails: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreatedGame {
    pub game: Game,
    pub participants: Vec<Participant>,
}

/// A game's story as the presentation layer consumes it.
#[derive(Debug, Clone)]
pub struct Story {
    pub game: Game,
    pub sentences: Vec<Sentence>,
}

/// Game lifecycle service.
#[derive(Default)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Create a game with its participants and optional opening sentence.
    ///
    /// Runs in the caller's transaction so the whole aggregate lands
    /// atomically: game row, participants with turn_order 1..N, and the
    /// turn-0 opener.
    pub async fn create_game<C: ConnectionTrait + Send + Sync>(
        &self,
        txn: &C,
        request: GameCreateRequest,
    ) -> Result<CreatedGame, DomainError> {
        let count = request.participant_emails.len();
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidParticipantCount,
                format!(
                    "A game needs between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS} participants, got {count}"
                ),
            ));
        }

        let mut emails = Vec::with_capacity(count);
        let mut seen = HashSet::new();
        for raw in &request.participant_emails {
            let email = validate_email(raw)?;
            if !seen.insert(email.clone()) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateParticipantEmail,
                    format!("'{email}' appears more than once"),
                ));
            }
            emails.push(email);
        }

        let opening = match &request.opening_sentence {
            Some(text) => Some(validate_sentence_body(text)?),
            None => None,
        };

        let host_email = emails[0].clone();
        let share_code = pick_share_code(txn).await?;

        let mut dto = GameCreate::new(host_email.clone(), count as i16, share_code);
        if let Some(title) = request.title.clone() {
            dto = dto.with_title(title);
        }
        let game = games::create_game(txn, dto).await?;

        let mut created_participants = Vec::with_capacity(count);
        for (index, email) in emails.iter().enumerate() {
            let participant =
                participants::create_participant(txn, game.id, email.clone(), (index + 1) as i16)
                    .await?;
            created_participants.push(participant);
        }

        if let Some(body) = opening {
            sentences::create_sentence(
                txn,
                SentenceCreate::new(game.id, OPENING_TURN, host_email, body),
            )
            .await?;
        }

        info!(
            game_id = game.id,
            participants = count,
            share_code = %game.share_code,
            "game created"
        );

        Ok(CreatedGame {
            game,
            participants: created_participants,
        })
    }

    /// Load a game's story: title, status and sentences ordered by turn.
    pub async fn fetch_story<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<Story, DomainError> {
        let game = games::require_game(conn, game_id).await?;
        let sentences = sentences::list_by_game(conn, game_id).await?;
        Ok(Story { game, sentences })
    }
}

/// Pick a share code not currently in use.
///
/// The pre-check keeps collisions out of the aggregate insert; the unique
/// index still backstops a check-to-insert race, surfacing it as a
/// retryable ShareCodeConflict.
async fn pick_share_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<String, DomainError> {
    for _ in 0..SHARE_CODE_ATTEMPTS {
        let code = generate_share_code();
        if games::find_by_share_code(conn, &code).await?.is_none() {
            return Ok(code);
        }
    }
    Err(DomainError::conflict(
        ConflictKind::ShareCodeConflict,
        "Could not allocate a free share code",
    ))
}
