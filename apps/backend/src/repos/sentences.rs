//! Sentence repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::sentences_sea as sentences_adapter;
use crate::adapters::sentences_sea::SentenceCreate;
use crate::entities::sentences;
use crate::errors::domain::DomainError;

/// Sentence domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub id: i64,
    pub game_id: i64,
    pub turn_number: i16,
    pub author_email: String,
    pub body: String,
    pub created_at: time::OffsetDateTime,
}

/// Outcome of the idempotent insert: `created` tells whether this request
/// won the turn or observed an earlier winner's row.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceInsert {
    pub created: bool,
    pub sentence: Sentence,
}

// Free functions (generic) mirroring the adapter surface

pub async fn create_sentence<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SentenceCreate,
) -> Result<Sentence, DomainError> {
    let sentence = sentences_adapter::create_sentence(conn, dto).await?;
    Ok(Sentence::from(sentence))
}

/// Insert the sentence for a turn, or read back the row that beat it there.
///
/// This is the coordinator's single atomic arbiter for the
/// one-sentence-per-turn invariant.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SentenceCreate,
) -> Result<SentenceInsert, DomainError> {
    let outcome = sentences_adapter::insert_if_absent(conn, dto).await?;
    Ok(SentenceInsert {
        created: outcome.created,
        sentence: Sentence::from(outcome.sentence),
    })
}

pub async fn find_for_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
) -> Result<Option<Sentence>, DomainError> {
    let sentence = sentences_adapter::find_for_turn(conn, game_id, turn_number).await?;
    Ok(sentence.map(Sentence::from))
}

pub async fn find_for_turn_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
    author_email: &str,
) -> Result<Option<Sentence>, DomainError> {
    let sentence =
        sentences_adapter::find_for_turn_by_author(conn, game_id, turn_number, author_email)
            .await?;
    Ok(sentence.map(Sentence::from))
}

pub async fn find_latest_before<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
) -> Result<Option<Sentence>, DomainError> {
    let sentence = sentences_adapter::find_latest_before(conn, game_id, turn_number).await?;
    Ok(sentence.map(Sentence::from))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Sentence>, DomainError> {
    let sentences = sentences_adapter::list_by_game(conn, game_id).await?;
    Ok(sentences.into_iter().map(Sentence::from).collect())
}

impl From<sentences::Model> for Sentence {
    fn from(model: sentences::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            turn_number: model.turn_number,
            author_email: model.author_email,
            body: model.body,
            created_at: model.created_at,
        }
    }
}
