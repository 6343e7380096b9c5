//! DTOs for games_sea adapter.

use crate::entities::games::GameStatus;

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub title: Option<String>,
    pub host_email: String,
    pub max_participants: i16,
    pub share_code: String,
}

impl GameCreate {
    pub fn new(
        host_email: impl Into<String>,
        max_participants: i16,
        share_code: impl Into<String>,
    ) -> Self {
        Self {
            title: None,
            host_email: host_email.into(),
            max_participants,
            share_code: share_code.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Outcome of a turn, applied as one guarded UPDATE on the games row.
///
/// The update is filtered by `(id, status = ACTIVE, current_turn =
/// expected_turn)` so a submission whose view of the turn counter went stale
/// matches zero rows instead of clobbering a concurrent advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Advance `current_turn` by one.
    Advance,
    /// Final turn: mark the game COMPLETED, leave `current_turn` unchanged.
    Complete,
}

#[derive(Debug, Clone)]
pub struct GameTurnUpdate {
    pub id: i64,
    pub expected_turn: i16,
    pub outcome: TurnOutcome,
}

impl GameTurnUpdate {
    pub fn advance(id: i64, expected_turn: i16) -> Self {
        Self {
            id,
            expected_turn,
            outcome: TurnOutcome::Advance,
        }
    }

    pub fn complete(id: i64, expected_turn: i16) -> Self {
        Self {
            id,
            expected_turn,
            outcome: TurnOutcome::Complete,
        }
    }
}

/// Convenience used by error payloads.
pub fn status_str(status: &GameStatus) -> &'static str {
    match status {
        GameStatus::Active => "ACTIVE",
        GameStatus::Completed => "COMPLETED",
    }
}
