//! SeaORM adapter for the games table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::games;

pub mod dto;

pub use dto::{GameCreate, GameTurnUpdate, TurnOutcome};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Helper: Apply a turn-guarded update, then refetch.
///
/// Consolidates the repetitive pattern:
/// - Adds updated_at to the update
/// - Filters by id, ACTIVE status and the expected current_turn
/// - Checks rows_affected to distinguish NotFound vs a stale turn counter
/// - Refetches and returns the updated model
///
/// The caller provides a closure that configures outcome-specific columns.
async fn guarded_turn_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_turn: i16,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::Status.eq(games::GameStatus::Active))
        .filter(games::Column::CurrentTurn.eq(expected_turn))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Either the game doesn't exist or the turn counter moved; fetch to
        // distinguish and build a structured payload for the latter.
        let game = games::Entity::find_by_id(id).one(conn).await?;
        if let Some(game) = game {
            let payload = format!(
                "STALE_TURN:{{\"expected\":{},\"actual\":{},\"status\":\"{}\"}}",
                expected_turn,
                game.current_turn,
                dto::status_str(&game.status)
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string()));
    }

    games::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn find_by_share_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    share_code: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::ShareCode.eq(share_code))
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        host_email: Set(dto.host_email),
        max_participants: Set(dto.max_participants),
        current_turn: Set(1),
        status: Set(games::GameStatus::Active),
        share_code: Set(dto.share_code),
        created_at: Set(now),
        updated_at: Set(now),
        completed_at: NotSet,
    };

    game_active.insert(conn).await
}

/// Apply a turn outcome: advance `current_turn` or mark the game COMPLETED.
///
/// The filter on the expected turn makes the update a no-op when another
/// submission already advanced or completed the game; that case surfaces as
/// a STALE_TURN custom error for the repos layer to map.
pub async fn apply_turn_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameTurnUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Alias, Expr};

    match dto.outcome {
        TurnOutcome::Advance => {
            guarded_turn_update_then_fetch(conn, dto.id, dto.expected_turn, |update| {
                update.col_expr(
                    games::Column::CurrentTurn,
                    Expr::col(games::Column::CurrentTurn).add(1),
                )
            })
            .await
        }
        TurnOutcome::Complete => {
            let now = time::OffsetDateTime::now_utc();
            guarded_turn_update_then_fetch(conn, dto.id, dto.expected_turn, move |update| {
                update
                    .col_expr(
                        games::Column::Status,
                        Expr::val(games::GameStatus::Completed)
                            .cast_as(Alias::new("game_status")),
                    )
                    .col_expr(games::Column::CompletedAt, Expr::val(now).into())
            })
            .await
        }
    }
}
