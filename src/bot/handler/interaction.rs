use serenity::all::{Context, Interaction};

use crate::bot::{
    command::{log_channel, temprole},
    handler::Handler,
};

/// Dispatches slash commands to their handlers.
///
/// Command failures are logged here; each command replies to the user itself.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let result = match command.data.name.as_str() {
        temprole::NAME => temprole::run(handler, &ctx, &command).await,
        log_channel::NAME => log_channel::run(handler, &ctx, &command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("Command /{} failed: {}", command.data.name, e);
    }
}
