//! Guild configuration repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::guild_config::{GuildConfig, UpdateGuildConfigParam};

/// Default command prefix for guilds without a stored configuration.
pub const DEFAULT_PREFIX: &str = "!";

/// Repository for per-guild configuration rows.
pub struct GuildConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a guild's configuration, creating a default row on first access.
    ///
    /// The insert ignores conflicts, so two concurrent first reads for the same guild both
    /// end up reading the single row.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Existing or newly created configuration
    /// - `Err(DbErr)` - Database error during query or insert
    pub async fn get_or_create(&self, guild_id: u64) -> Result<GuildConfig, DbErr> {
        if let Some(entity) = entity::prelude::GuildConfig::find_by_id(guild_id as i64)
            .one(self.db)
            .await?
        {
            return Ok(GuildConfig::from_entity(entity));
        }

        entity::prelude::GuildConfig::insert(entity::guild_config::ActiveModel {
            guild_id: ActiveValue::Set(guild_id as i64),
            prefix: ActiveValue::Set(DEFAULT_PREFIX.to_string()),
            welcome_channel_id: ActiveValue::Set(None),
            log_channel_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::guild_config::Column::GuildId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        let entity = entity::prelude::GuildConfig::find_by_id(guild_id as i64)
            .one(self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("guild_config for guild {}", guild_id))
            })?;

        Ok(GuildConfig::from_entity(entity))
    }

    /// Updates the given fields of a guild's configuration.
    ///
    /// Creates the default row first if the guild has none. An empty param returns the
    /// current configuration without writing.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Configuration after the update
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn update(
        &self,
        guild_id: u64,
        param: UpdateGuildConfigParam,
    ) -> Result<GuildConfig, DbErr> {
        let current = self.get_or_create(guild_id).await?;

        if param.is_empty() {
            return Ok(current);
        }

        let mut active = entity::guild_config::ActiveModel {
            guild_id: ActiveValue::Unchanged(guild_id as i64),
            ..Default::default()
        };

        if let Some(prefix) = param.prefix {
            active.prefix = ActiveValue::Set(prefix);
        }
        if let Some(channel_id) = param.welcome_channel_id {
            active.welcome_channel_id = ActiveValue::Set(channel_id.map(|id| id as i64));
        }
        if let Some(channel_id) = param.log_channel_id {
            active.log_channel_id = ActiveValue::Set(channel_id.map(|id| id as i64));
        }

        let entity = active.update(self.db).await?;

        Ok(GuildConfig::from_entity(entity))
    }
}
