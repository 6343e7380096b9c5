//! SeaORM adapter for the sentences table - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::sentences;
use crate::infra::db_errors::is_unique_violation;

pub mod dto;

pub use dto::{SentenceCreate, SentenceInsert};

fn active_model(dto: SentenceCreate) -> sentences::ActiveModel {
    let now = time::OffsetDateTime::now_utc();
    sentences::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        turn_number: Set(dto.turn_number),
        author_email: Set(dto.author_email),
        body: Set(dto.body),
        created_at: Set(now),
    }
}

/// Plain insert, used at game creation for the opening sentence where the
/// enclosing transaction owns the whole aggregate.
pub async fn create_sentence<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SentenceCreate,
) -> Result<sentences::Model, sea_orm::DbErr> {
    active_model(dto).insert(conn).await
}

/// Atomic insert-or-report-existing for the one-sentence-per-turn invariant.
///
/// The unique index on (game_id, turn_number) is the arbiter: when the
/// insert loses to a concurrent or earlier request, the existing row is read
/// back and returned with `created = false`. Callers must not treat that as
/// a failure; it is the idempotent-duplicate path.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SentenceCreate,
) -> Result<SentenceInsert, sea_orm::DbErr> {
    let game_id = dto.game_id;
    let turn_number = dto.turn_number;

    match active_model(dto).insert(conn).await {
        Ok(sentence) => Ok(SentenceInsert {
            created: true,
            sentence,
        }),
        Err(e) if is_unique_violation(&e) => {
            let existing = find_for_turn(conn, game_id, turn_number)
                .await?
                .ok_or_else(|| {
                    // The violated constraint guarantees the row exists; not
                    // finding it means the conflicting writer rolled back and
                    // the caller should retry.
                    sea_orm::DbErr::RecordNotFound("Sentence not found".to_string())
                })?;
            Ok(SentenceInsert {
                created: false,
                sentence: existing,
            })
        }
        Err(e) => Err(e),
    }
}

pub async fn find_for_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
) -> Result<Option<sentences::Model>, sea_orm::DbErr> {
    sentences::Entity::find()
        .filter(sentences::Column::GameId.eq(game_id))
        .filter(sentences::Column::TurnNumber.eq(turn_number))
        .one(conn)
        .await
}

pub async fn find_for_turn_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
    author_email: &str,
) -> Result<Option<sentences::Model>, sea_orm::DbErr> {
    sentences::Entity::find()
        .filter(sentences::Column::GameId.eq(game_id))
        .filter(sentences::Column::TurnNumber.eq(turn_number))
        .filter(sentences::Column::AuthorEmail.eq(author_email))
        .one(conn)
        .await
}

/// Most recent sentence strictly before `turn_number` (the "previous
/// sentence" a writer is shown). Includes the turn-0 opener when present.
pub async fn find_latest_before<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_number: i16,
) -> Result<Option<sentences::Model>, sea_orm::DbErr> {
    sentences::Entity::find()
        .filter(sentences::Column::GameId.eq(game_id))
        .filter(sentences::Column::TurnNumber.lt(turn_number))
        .order_by_desc(sentences::Column::TurnNumber)
        .one(conn)
        .await
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<sentences::Model>, sea_orm::DbErr> {
    sentences::Entity::find()
        .filter(sentences::Column::GameId.eq(game_id))
        .order_by_asc(sentences::Column::TurnNumber)
        .all(conn)
        .await
}
