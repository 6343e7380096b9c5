//! Game Reader: what should this participant see right now?
//!
//! Purely a read; never mutates state. The presentation layer renders the
//! returned view directly.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::sentences::Sentence;
use crate::repos::{games, participants, sentences};

/// The participant-facing view of a game at its current turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantView {
    /// This participant already wrote the sentence for the current turn;
    /// `sentence` carries the stored text. A terminal, idempotent view, not
    /// an error.
    AlreadySubmitted { sentence: Sentence },
    /// Someone else's turn is in progress. A normal wait state, not an
    /// error.
    WaitingForTurn { current_turn: i16 },
    /// This participant may write now. `previous` is the immediately
    /// preceding contribution (the turn-0 opener on turn 1), or `None` when
    /// no prior sentence was recorded.
    ReadyToWrite { previous: Option<Sentence> },
}

/// Resolve the view for a (game, participant) pair.
///
/// Check order matters: completion is reported before already-submitted so a
/// finished game never invites further writing, and already-submitted is
/// reported before the turn check so a retried request lands on its own
/// earlier submission rather than a confusing wait state.
pub async fn resolve_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
) -> Result<ParticipantView, DomainError> {
    let game = games::require_game(conn, game_id).await?;
    let participant = participants::require_in_game(conn, game_id, participant_id).await?;

    if game.is_completed() {
        return Err(DomainError::conflict(
            ConflictKind::GameCompleted,
            "This game has already been completed",
        ));
    }

    if let Some(sentence) =
        sentences::find_for_turn_by_author(conn, game_id, game.current_turn, &participant.email)
            .await?
    {
        return Ok(ParticipantView::AlreadySubmitted { sentence });
    }

    if participant.turn_order != game.current_turn {
        return Ok(ParticipantView::WaitingForTurn {
            current_turn: game.current_turn,
        });
    }

    let previous = sentences::find_latest_before(conn, game_id, game.current_turn).await?;
    Ok(ParticipantView::ReadyToWrite { previous })
}
