//! Cached access to per-guild configuration.
//!
//! Reads go through a `moka` cache with a fixed time-to-live. Writes through this service
//! invalidate the guild's entry; writes made elsewhere become visible once the entry expires
//! or is invalidated explicitly.

use std::time::Duration;

use moka::future::Cache;
use sea_orm::DatabaseConnection;

use crate::{
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::guild_config::{GuildConfig, UpdateGuildConfigParam},
};

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_seconds: u64,
}

#[derive(Clone)]
pub struct GuildConfigService {
    db: DatabaseConnection,
    cache: Cache<u64, GuildConfig>,
    ttl: Duration,
}

impl GuildConfigService {
    /// Creates the service with an empty cache.
    ///
    /// # Arguments
    /// - `db` - Database connection holding the `guild_config` table
    /// - `ttl` - How long a cached configuration is served before reloading
    /// - `capacity` - Maximum number of cached guilds
    pub fn new(db: DatabaseConnection, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { db, cache, ttl }
    }

    /// Gets a guild's configuration, loading and caching it on a miss.
    ///
    /// Guilds without a stored row get a default one created.
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Cached or freshly loaded configuration
    /// - `Err(AppError::DbErr)` - Loading the row failed; nothing is cached
    pub async fn get(&self, guild_id: u64) -> Result<GuildConfig, AppError> {
        if let Some(config) = self.cache.get(&guild_id).await {
            return Ok(config);
        }

        let config = GuildConfigRepository::new(&self.db)
            .get_or_create(guild_id)
            .await?;

        self.cache.insert(guild_id, config.clone()).await;
        tracing::debug!("Cached configuration for guild {}", guild_id);

        Ok(config)
    }

    /// Updates a guild's configuration and drops its cached entry.
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Configuration after the update
    /// - `Err(AppError::DbErr)` - Update failed; the cached entry is left as is
    pub async fn update(
        &self,
        guild_id: u64,
        param: UpdateGuildConfigParam,
    ) -> Result<GuildConfig, AppError> {
        let config = GuildConfigRepository::new(&self.db)
            .update(guild_id, param)
            .await?;

        self.cache.invalidate(&guild_id).await;

        Ok(config)
    }

    /// Drops one guild's cached entry, or every entry when `guild_id` is `None`.
    pub async fn invalidate(&self, guild_id: Option<u64>) {
        match guild_id {
            Some(guild_id) => {
                self.cache.invalidate(&guild_id).await;
                tracing::debug!("Invalidated cached configuration for guild {}", guild_id);
            }
            None => {
                self.cache.invalidate_all();
                tracing::debug!("Invalidated all cached guild configurations");
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;

        CacheStats {
            entries: self.cache.entry_count(),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}
