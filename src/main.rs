mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod util;

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{config::Config, error::AppError, service::guild_config::GuildConfigService};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);
    let db = startup::connect_to_database(&config).await?;

    let guild_configs = GuildConfigService::new(
        db.clone(),
        config.guild_config_cache_ttl,
        config.guild_config_cache_capacity,
    );

    // Filled by the ready handler once stored grants have been recovered.
    let runtime = Arc::new(OnceCell::new());

    let mut client =
        bot::start::init_bot(config.clone(), db, guild_configs, runtime.clone()).await?;
    let shard_manager = client.shard_manager.clone();

    tracing::info!("Starting Discord bot...");

    let mut bot = tokio::spawn(async move {
        if let Err(e) = client.start().await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        _ = &mut bot => {
            tracing::warn!("Discord client stopped");
        }
    }

    if let Some(runtime) = runtime.get() {
        if let Err(e) = runtime.shutdown().await {
            tracing::error!("Failed to stop temporary role runtime: {}", e);
        }
    }

    shard_manager.shutdown_all().await;

    Ok(())
}
