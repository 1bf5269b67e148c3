use sea_orm::Statement;
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
    Phase,
    GridSize,
    CreatedAt,
}

#[derive(Iden)]
enum Agents {
    Table,
    Id,
    GameId,
    Name,
    Token,
    Coins,
    IsDone,
    CreatedAt,
}

#[derive(Iden)]
enum PaintStocks {
    Table,
    AgentId,
    Color,
    Quantity,
}

#[derive(Iden)]
enum Tiles {
    Table,
    GameId,
    X,
    Y,
    OwnerId,
    Color,
}

#[derive(Iden)]
enum Offers {
    Table,
    Id,
    GameId,
    AgentId,
    Kind,
    Status,
    TileX,
    TileY,
    PaintColor,
    PaintQuantity,
    Price,
    AcceptedBy,
    CreatedAt,
}

#[derive(Iden)]
enum ChatMessages {
    Table,
    Id,
    GameId,
    AgentId,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum GamePhaseEnum {
    #[iden = "game_phase"]
    Type,
}

#[derive(Iden)]
enum PaintColorEnum {
    #[iden = "paint_color"]
    Type,
}

#[derive(Iden)]
enum OfferKindEnum {
    #[iden = "offer_kind"]
    Type,
}

#[derive(Iden)]
enum OfferStatusEnum {
    #[iden = "offer_status"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Postgres enums (PostgreSQL only; SQLite stores them as TEXT)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            sea_orm::DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "game_phase").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GamePhaseEnum::Type)
                                .values(["waiting", "running", "finished"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "paint_color").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PaintColorEnum::Type)
                                .values([
                                    "indigo",
                                    "teal",
                                    "saffron",
                                    "coral",
                                    "vermillion",
                                    "slate",
                                    "plum",
                                    "cream",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "offer_kind").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(OfferKindEnum::Type)
                                .values(["sell_tile", "buy_tile", "sell_paint", "buy_paint"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "offer_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(OfferStatusEnum::Type)
                                .values(["open", "accepted", "cancelled"])
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

        // games
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
                    .col(
                        ColumnDef::new(Games::Phase)
                            .custom(GamePhaseEnum::Type)
                            .not_null()
                            .default("waiting"),
                    )
                    .col(
                        ColumnDef::new(Games::GridSize)
                            .integer()
                            .not_null()
                            .default(32),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // agents
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agents::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Agents::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Agents::Name).string().not_null())
                    .col(
                        ColumnDef::new(Agents::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Agents::Coins)
                            .big_integer()
                            .not_null()
                            .default(1000),
                    )
                    .col(
                        ColumnDef::new(Agents::IsDone)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Agents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_agents_game_id")
                            .from(Agents::Table, Agents::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // unique index on agents (game_id, name)
        manager
            .create_index(
                Index::create()
                    .name("ux_agents_game_name")
                    .table(Agents::Table)
                    .col(Agents::GameId)
                    .col(Agents::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agents_token")
                    .table(Agents::Table)
                    .col(Agents::Token)
                    .to_owned(),
            )
            .await?;

        // paint_stocks
        manager
            .create_table(
                Table::create()
                    .table(PaintStocks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PaintStocks::AgentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PaintStocks::Color)
                            .custom(PaintColorEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaintStocks::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(PaintStocks::AgentId)
                            .col(PaintStocks::Color),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_paint_stocks_agent_id")
                            .from(PaintStocks::Table, PaintStocks::AgentId)
                            .to(Agents::Table, Agents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // tiles
        manager
            .create_table(
                Table::create()
                    .table(Tiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tiles::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Tiles::X).integer().not_null())
                    .col(ColumnDef::new(Tiles::Y).integer().not_null())
                    .col(ColumnDef::new(Tiles::OwnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tiles::Color)
                            .custom(PaintColorEnum::Type)
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Tiles::GameId)
                            .col(Tiles::X)
                            .col(Tiles::Y),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tiles_game_id")
                            .from(Tiles::Table, Tiles::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tiles_owner_id")
                            .from(Tiles::Table, Tiles::OwnerId)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tiles_owner")
                    .table(Tiles::Table)
                    .col(Tiles::OwnerId)
                    .col(Tiles::GameId)
                    .to_owned(),
            )
            .await?;

        // offers
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Offers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Offers::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Offers::AgentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Offers::Kind)
                            .custom(OfferKindEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Offers::Status)
                            .custom(OfferStatusEnum::Type)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Offers::TileX).integer().null())
                    .col(ColumnDef::new(Offers::TileY).integer().null())
                    .col(
                        ColumnDef::new(Offers::PaintColor)
                            .custom(PaintColorEnum::Type)
                            .null(),
                    )
                    .col(ColumnDef::new(Offers::PaintQuantity).integer().null())
                    .col(ColumnDef::new(Offers::Price).big_integer().not_null())
                    .col(ColumnDef::new(Offers::AcceptedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_game_id")
                            .from(Offers::Table, Offers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_agent_id")
                            .from(Offers::Table, Offers::AgentId)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_offers_game_status")
                    .table(Offers::Table)
                    .col(Offers::GameId)
                    .col(Offers::Status)
                    .to_owned(),
            )
            .await?;

        // chat_messages
        manager
            .create_table(
                Table::create()
                    .table(ChatMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatMessages::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ChatMessages::GameId).big_integer().not_null())
                    .col(ColumnDef::new(ChatMessages::AgentId).big_integer().not_null())
                    .col(ColumnDef::new(ChatMessages::Content).string().not_null())
                    .col(
                        ColumnDef::new(ChatMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_messages_game_id")
                            .from(ChatMessages::Table, ChatMessages::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_messages_agent_id")
                            .from(ChatMessages::Table, ChatMessages::AgentId)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chat_messages_game")
                    .table(ChatMessages::Table)
                    .col(ChatMessages::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatMessages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Offers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tiles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaintStocks::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Agents::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(PgType::drop().name(OfferStatusEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(OfferKindEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(PaintColorEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(GamePhaseEnum::Type).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
