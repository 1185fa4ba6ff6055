use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use tokio::sync::OnceCell;

use crate::{
    bot::handler::Handler, config::Config, error::AppError,
    scheduler::temp_roles::TempRoleRuntime, service::guild_config::GuildConfigService,
};

/// Builds the Discord client without connecting it.
///
/// The caller starts the client, which lets it keep the shard manager around for shutdown.
/// The temporary role runtime is initialized by the `ready` handler and published through
/// `runtime`, so commands that record grants are unavailable until recovery has run.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection for the bot to use
/// - `guild_configs` - Shared guild configuration cache
/// - `runtime` - Slot the ready handler fills with the temporary role runtime
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: Arc<Config>,
    db: DatabaseConnection,
    guild_configs: GuildConfigService,
    runtime: Arc<OnceCell<TempRoleRuntime>>,
) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(config.clone(), db, guild_configs, runtime);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}
