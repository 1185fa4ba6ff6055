use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Guild, Interaction, Ready, UnavailableGuild};
use serenity::async_trait;
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    scheduler::temp_roles::TempRoleRuntime,
    service::{guild_config::GuildConfigService, moderation_log::ModerationLogService},
};

pub mod guild;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
    pub guild_configs: GuildConfigService,
    pub moderation_log: ModerationLogService,
    /// Set once by the first `ready` event.
    pub runtime: Arc<OnceCell<TempRoleRuntime>>,
}

impl Handler {
    pub fn new(
        config: Arc<Config>,
        db: DatabaseConnection,
        guild_configs: GuildConfigService,
        runtime: Arc<OnceCell<TempRoleRuntime>>,
    ) -> Self {
        Self {
            config,
            db,
            moderation_log: ModerationLogService::new(guild_configs.clone()),
            guild_configs,
            runtime,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called for slash commands and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }

    /// Called when the bot leaves a guild or the guild becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(self, ctx, incomplete, full).await;
    }
}
