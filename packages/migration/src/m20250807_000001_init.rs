use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Title,
    HostEmail,
    MaxParticipants,
    CurrentTurn,
    Status,
    ShareCode,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}

#[derive(Iden)]
enum GameStatusEnum {
    #[iden = "game_status"]
    Type,
}

#[derive(Iden)]
enum Participants {
    Table,
    Id,
    GameId,
    Email,
    TurnOrder,
    HasCompleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Sentences {
    Table,
    Id,
    GameId,
    TurnNumber,
    AuthorEmail,
    Body,
    CreatedAt,
}

async fn enum_exists(manager: &SchemaManager<'_>, name: &str) -> Result<bool, DbErr> {
    let stmt = Statement::from_string(
        sea_orm::DatabaseBackend::Postgres,
        format!("SELECT 1 FROM pg_type WHERE typname = '{name}'"),
    );
    Ok(manager.get_connection().query_one(stmt).await?.is_some())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                if !enum_exists(manager, "game_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameStatusEnum::Type)
                                .values(["ACTIVE", "COMPLETED"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't need enum types - they're stored as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // games table
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::Title).string().null())
                    .col(ColumnDef::new(Games::HostEmail).string().not_null())
                    .col(
                        ColumnDef::new(Games::MaxParticipants)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::CurrentTurn)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Games::Status)
                            .custom(GameStatusEnum::Type)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Games::ShareCode).string().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_share_code")
                    .table(Games::Table)
                    .col(Games::ShareCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // participants table
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Participants::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Email).string().not_null())
                    .col(
                        ColumnDef::new(Participants::TurnOrder)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::HasCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participants_game_id")
                            .from(Participants::Table, Participants::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One seat per email, one email per seat, within a game.
        manager
            .create_index(
                Index::create()
                    .name("ux_participants_game_id_email")
                    .table(Participants::Table)
                    .col(Participants::GameId)
                    .col(Participants::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_participants_game_id_turn_order")
                    .table(Participants::Table)
                    .col(Participants::GameId)
                    .col(Participants::TurnOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // sentences table
        manager
            .create_table(
                Table::create()
                    .table(Sentences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sentences::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Sentences::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sentences::TurnNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sentences::AuthorEmail).string().not_null())
                    .col(ColumnDef::new(Sentences::Body).string().not_null())
                    .col(
                        ColumnDef::new(Sentences::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sentences_game_id")
                            .from(Sentences::Table, Sentences::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one sentence per (game, turn). This constraint is the
        // arbiter for concurrent submissions; the coordinator treats a
        // violation here as "another request already won this turn".
        manager
            .create_index(
                Index::create()
                    .name("ux_sentences_game_id_turn_number")
                    .table(Sentences::Table)
                    .col(Sentences::GameId)
                    .col(Sentences::TurnNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_sentences_game_id_author_email")
                    .table(Sentences::Table)
                    .col(Sentences::GameId)
                    .col(Sentences::AuthorEmail)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sentences::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Participants::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(PgType::drop().name(GameStatusEnum::Type).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
