//! Factory for creating guild configuration test data.

use crate::fixture;
use entity::guild_config;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for building guild config rows with custom values.
pub struct GuildConfigFactory<'a> {
    db: &'a DatabaseConnection,
    entity: guild_config::Model,
}

impl<'a> GuildConfigFactory<'a> {
    /// Creates a new factory instance for the given guild with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `guild_id` - Discord guild ID
    pub fn new(db: &'a DatabaseConnection, guild_id: i64) -> Self {
        let entity = fixture::guild_config::entity_builder()
            .guild_id(guild_id)
            .build();

        Self { db, entity }
    }

    /// Sets the command prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.entity.prefix = prefix.into();
        self
    }

    /// Sets the moderation log channel ID.
    pub fn log_channel_id(mut self, channel_id: Option<i64>) -> Self {
        self.entity.log_channel_id = channel_id;
        self
    }

    /// Sets the welcome channel ID.
    pub fn welcome_channel_id(mut self, channel_id: Option<i64>) -> Self {
        self.entity.welcome_channel_id = channel_id;
        self
    }

    /// Builds and inserts the guild config.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created guild config
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<guild_config::Model, DbErr> {
        guild_config::ActiveModel {
            guild_id: ActiveValue::Set(self.entity.guild_id),
            prefix: ActiveValue::Set(self.entity.prefix),
            welcome_channel_id: ActiveValue::Set(self.entity.welcome_channel_id),
            log_channel_id: ActiveValue::Set(self.entity.log_channel_id),
            created_at: ActiveValue::Set(self.entity.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild config row with default values.
pub async fn create_guild_config(
    db: &DatabaseConnection,
    guild_id: i64,
) -> Result<guild_config::Model, DbErr> {
    GuildConfigFactory::new(db, guild_id).build().await
}
