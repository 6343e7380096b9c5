//! SeaORM adapter for the participants table - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::participants;

pub mod dto;

pub use dto::ParticipantCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::Id.eq(participant_id))
        .one(conn)
        .await
}

/// Find a participant by id, scoped to a game.
///
/// A participant id belonging to a different game is treated the same as a
/// missing participant.
pub async fn find_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::Id.eq(participant_id))
        .filter(participants::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

pub async fn require_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
) -> Result<participants::Model, sea_orm::DbErr> {
    find_in_game(conn, game_id, participant_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Participant not found".to_string()))
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_order: i16,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GameId.eq(game_id))
        .filter(participants::Column::TurnOrder.eq(turn_order))
        .one(conn)
        .await
}

pub async fn require_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_order: i16,
) -> Result<participants::Model, sea_orm::DbErr> {
    find_by_turn(conn, game_id, turn_order)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Participant not found".to_string()))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GameId.eq(game_id))
        .order_by_asc(participants::Column::TurnOrder)
        .all(conn)
        .await
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<participants::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant_active = participants::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        email: Set(dto.email),
        turn_order: Set(dto.turn_order),
        has_completed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    participant_active.insert(conn).await
}

/// Mark a participant as having contributed their sentence.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();
    let result = participants::Entity::update_many()
        .col_expr(participants::Column::HasCompleted, Expr::val(true).into())
        .col_expr(participants::Column::UpdatedAt, Expr::val(now).into())
        .filter(participants::Column::Id.eq(participant_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Participant not found".to_string(),
        ));
    }
    Ok(())
}
