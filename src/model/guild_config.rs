use chrono::{DateTime, Utc};

/// Per-guild bot settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildConfig {
    pub guild_id: u64,
    pub prefix: String,
    pub welcome_channel_id: Option<u64>,
    /// Channel that receives moderation log embeds, if configured.
    pub log_channel_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::guild_config::Model) -> Self {
        Self {
            guild_id: entity.guild_id as u64,
            prefix: entity.prefix,
            welcome_channel_id: entity.welcome_channel_id.map(|id| id as u64),
            log_channel_id: entity.log_channel_id.map(|id| id as u64),
            created_at: entity.created_at,
        }
    }
}

/// Fields to change on a guild's configuration.
///
/// `None` leaves a field untouched. For the channel fields, `Some(None)` clears the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateGuildConfigParam {
    pub prefix: Option<String>,
    pub welcome_channel_id: Option<Option<u64>>,
    pub log_channel_id: Option<Option<u64>>,
}

impl UpdateGuildConfigParam {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.welcome_channel_id.is_none() && self.log_channel_id.is_none()
    }
}
