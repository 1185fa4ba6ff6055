//! Moderation log embeds posted to a guild's configured log channel.

use std::sync::Arc;

use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};

use crate::{error::AppError, service::guild_config::GuildConfigService};

/// Embed colour for moderation log entries.
pub const LOG_COLOUR: u32 = 0xF0A030;

/// A moderation action to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationAction {
    pub guild_id: u64,
    /// Short action name shown in the embed title, e.g. "Temp Role".
    pub action: String,
    pub moderator_id: u64,
    pub target_id: u64,
    pub reason: Option<String>,
    pub extra_info: Option<String>,
}

/// Builds the log embed for an action.
pub fn build_log_embed(action: &ModerationAction, timestamp: Timestamp) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Moderation Action: {}", action.action))
        .color(LOG_COLOUR)
        .field("Moderator", format!("<@{}>", action.moderator_id), true)
        .field("Target", format!("<@{}>", action.target_id), true)
        .field(
            "Reason",
            action
                .reason
                .clone()
                .unwrap_or_else(|| "No reason provided".to_string()),
            false,
        )
        .timestamp(timestamp);

    if let Some(extra_info) = &action.extra_info {
        embed = embed.field("Details", extra_info.clone(), false);
    }

    embed
}

#[derive(Clone)]
pub struct ModerationLogService {
    guild_configs: GuildConfigService,
}

impl ModerationLogService {
    pub fn new(guild_configs: GuildConfigService) -> Self {
        Self { guild_configs }
    }

    /// Posts an action to the guild's log channel.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client used to post the embed
    /// - `action` - Action to record
    ///
    /// # Returns
    /// - `Ok(true)` - Embed posted
    /// - `Ok(false)` - Guild has no log channel configured
    /// - `Err(AppError)` - Config lookup or posting failed
    pub async fn log_action(
        &self,
        http: &Arc<Http>,
        action: &ModerationAction,
    ) -> Result<bool, AppError> {
        let config = self.guild_configs.get(action.guild_id).await?;

        let Some(channel_id) = config.log_channel_id.filter(|id| *id != 0) else {
            return Ok(false);
        };

        let embed = build_log_embed(action, Timestamp::now());
        ChannelId::new(channel_id)
            .send_message(http, CreateMessage::new().embed(embed))
            .await?;

        Ok(true)
    }
}
