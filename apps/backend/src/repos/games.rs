//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::adapters::games_sea::{GameCreate, GameTurnUpdate};
use crate::entities::games;
use crate::entities::games::GameStatus;
use crate::errors::domain::DomainError;

/// Game domain model
///
/// Represents a game in the domain layer with the fields turn coordination
/// needs. Converted from the database model (games::Model) when loaded
/// through repos functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub title: Option<String>,
    pub host_email: String,
    pub max_participants: i16,
    pub current_turn: i16,
    pub status: GameStatus,
    pub share_code: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub completed_at: Option<time::OffsetDateTime>,
}

impl Game {
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

pub async fn find_by_share_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    share_code: &str,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_share_code(conn, share_code).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return error if not found.
///
/// Convenience helper that converts `None` into a DomainError, eliminating
/// the repetitive `ok_or_else` pattern when a game must exist.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

/// Advance the game to the next turn, guarded by the expected current turn.
pub async fn advance_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_turn: i16,
) -> Result<Game, DomainError> {
    let game =
        games_adapter::apply_turn_outcome(conn, GameTurnUpdate::advance(game_id, expected_turn))
            .await?;
    Ok(Game::from(game))
}

/// Mark the game completed after its final turn, guarded by the expected
/// current turn. `current_turn` keeps its terminal value.
pub async fn complete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_turn: i16,
) -> Result<Game, DomainError> {
    let game =
        games_adapter::apply_turn_outcome(conn, GameTurnUpdate::complete(game_id, expected_turn))
            .await?;
    Ok(Game::from(game))
}

// Conversions between SeaORM models and domain models

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            host_email: model.host_email,
            max_participants: model.max_participants,
            current_turn: model.current_turn,
            status: model.status,
            share_code: model.share_code,
            created_at: model.created_at,
            updated_at: model.updated_at,
            completed_at: model.completed_at,
        }
    }
}
