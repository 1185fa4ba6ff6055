use serenity::all::{Context, Guild, UnavailableGuild};

use crate::bot::handler::Handler;

/// Handles the bot leaving a guild.
///
/// Drops the guild's cached configuration. Outages (`unavailable`) keep the entry, since the
/// guild comes back unchanged.
pub async fn handle_guild_delete(
    handler: &Handler,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    if incomplete.unavailable {
        tracing::debug!("Guild {} became unavailable", incomplete.id);
        return;
    }

    handler
        .guild_configs
        .invalidate(Some(incomplete.id.get()))
        .await;

    let stats = handler.guild_configs.stats().await;
    tracing::info!(
        "Left guild {} ({} guild configurations cached)",
        incomplete.id,
        stats.entries
    );
}
