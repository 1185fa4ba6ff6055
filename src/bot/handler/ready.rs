//! Ready event handler for bot initialization.
//!
//! The ready event is the readiness gate for temporary roles: slash commands are registered
//! and the temporary role runtime is started (recovering stored grants) only once the gateway
//! handshake has completed. Ready fires again after reconnects; the runtime starts only once.

use std::sync::Arc;

use serenity::all::{ActivityData, Context, Ready};

use crate::{
    bot::{command, handler::Handler},
    scheduler::temp_roles::TempRoleRuntime,
    service::discord::directory::{GuildDirectory, SerenityDirectory},
    util::clock::SystemClock,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Event handler holding shared state
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("temporary roles")));

    if let Err(e) = command::register(&ctx).await {
        tracing::error!("Failed to register slash commands: {}", e);
    }

    let directory: Arc<dyn GuildDirectory> =
        Arc::new(SerenityDirectory::new(ctx.cache.clone(), ctx.http.clone()));

    let result = handler
        .runtime
        .get_or_try_init(|| {
            TempRoleRuntime::start(
                handler.db.clone(),
                directory,
                Arc::new(SystemClock),
                &handler.config,
            )
        })
        .await;

    if let Err(e) = result {
        tracing::error!("Failed to start temporary role runtime: {}", e);
    }
}
