use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildConfig::Table)
                    .if_not_exists()
                    .col(big_integer(GuildConfig::GuildId).primary_key())
                    .col(string(GuildConfig::Prefix).default("!"))
                    .col(big_integer_null(GuildConfig::WelcomeChannelId))
                    .col(big_integer_null(GuildConfig::LogChannelId))
                    .col(
                        timestamp_with_time_zone(GuildConfig::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildConfig {
    Table,
    GuildId,
    Prefix,
    WelcomeChannelId,
    LogChannelId,
    CreatedAt,
}
