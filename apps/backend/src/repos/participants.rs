//! Participant repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::participants_sea as participants_adapter;
use crate::adapters::participants_sea::ParticipantCreate;
use crate::entities::participants;
use crate::errors::domain::DomainError;

/// Participant domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub game_id: i64,
    pub email: String,
    pub turn_order: i16,
    pub has_completed: bool,
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let participant = participants_adapter::find_in_game(conn, game_id, participant_id).await?;
    Ok(participant.map(Participant::from))
}

/// Find a participant by id within a game, or fail with a domain not-found.
///
/// A participant attached to a different game is indistinguishable from a
/// missing one at this boundary.
pub async fn require_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
) -> Result<Participant, DomainError> {
    let participant = participants_adapter::require_in_game(conn, game_id, participant_id).await?;
    Ok(Participant::from(participant))
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_order: i16,
) -> Result<Option<Participant>, DomainError> {
    let participant = participants_adapter::find_by_turn(conn, game_id, turn_order).await?;
    Ok(participant.map(Participant::from))
}

pub async fn require_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_order: i16,
) -> Result<Participant, DomainError> {
    let participant = participants_adapter::require_by_turn(conn, game_id, turn_order).await?;
    Ok(Participant::from(participant))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let participants = participants_adapter::list_by_game(conn, game_id).await?;
    Ok(participants.into_iter().map(Participant::from).collect())
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    email: impl Into<String>,
    turn_order: i16,
) -> Result<Participant, DomainError> {
    let dto = ParticipantCreate::new(game_id, email, turn_order);
    let participant = participants_adapter::create_participant(conn, dto).await?;
    Ok(Participant::from(participant))
}

pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<(), DomainError> {
    participants_adapter::mark_completed(conn, participant_id).await?;
    Ok(())
}

impl From<participants::Model> for Participant {
    fn from(model: participants::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            email: model.email,
            turn_order: model.turn_order,
            has_completed: model.has_completed,
        }
    }
}
