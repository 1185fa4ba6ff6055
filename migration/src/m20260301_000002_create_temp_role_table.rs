use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempRole::Table)
                    .if_not_exists()
                    .col(big_integer(TempRole::GuildId))
                    .col(big_integer(TempRole::UserId))
                    .col(big_integer(TempRole::RoleId))
                    .col(big_integer(TempRole::ExpiresAt))
                    .primary_key(
                        Index::create()
                            .name("pk_temp_role")
                            .col(TempRole::GuildId)
                            .col(TempRole::UserId)
                            .col(TempRole::RoleId),
                    )
                    .to_owned(),
            )
            .await?;

        // The sweep filters on expires_at every tick
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_temp_role_expires_at")
                    .table(TempRole::Table)
                    .col(TempRole::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TempRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TempRole {
    Table,
    GuildId,
    UserId,
    RoleId,
    ExpiresAt,
}
