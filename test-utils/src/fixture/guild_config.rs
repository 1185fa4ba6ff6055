//! Fixture for guild configuration test data.

use chrono::{DateTime, Utc};
use entity::guild_config;

/// Default test guild ID.
pub const DEFAULT_GUILD_ID: i64 = 1;

/// Default command prefix, matching the column default.
pub const DEFAULT_PREFIX: &str = "!";

/// Creates a guild config entity model with default values.
///
/// # Returns
/// - `guild_config::Model` - In-memory entity with no channels configured
pub fn entity() -> guild_config::Model {
    entity_builder().build()
}

/// Creates a customizable guild config entity builder.
///
/// # Example
/// ```rust,ignore
/// let config = fixture::guild_config::entity_builder()
///     .log_channel_id(Some(555))
///     .build();
/// ```
pub fn entity_builder() -> GuildConfigEntityBuilder {
    GuildConfigEntityBuilder::default()
}

/// Builder for guild config entity models.
pub struct GuildConfigEntityBuilder {
    guild_id: i64,
    prefix: String,
    welcome_channel_id: Option<i64>,
    log_channel_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl Default for GuildConfigEntityBuilder {
    fn default() -> Self {
        Self {
            guild_id: DEFAULT_GUILD_ID,
            prefix: DEFAULT_PREFIX.to_string(),
            welcome_channel_id: None,
            log_channel_id: None,
            created_at: Utc::now(),
        }
    }
}

impl GuildConfigEntityBuilder {
    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: i64) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Sets the command prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the welcome channel ID.
    pub fn welcome_channel_id(mut self, channel_id: Option<i64>) -> Self {
        self.welcome_channel_id = channel_id;
        self
    }

    /// Sets the moderation log channel ID.
    pub fn log_channel_id(mut self, channel_id: Option<i64>) -> Self {
        self.log_channel_id = channel_id;
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> guild_config::Model {
        guild_config::Model {
            guild_id: self.guild_id,
            prefix: self.prefix,
            welcome_channel_id: self.welcome_channel_id,
            log_channel_id: self.log_channel_id,
            created_at: self.created_at,
        }
    }
}
