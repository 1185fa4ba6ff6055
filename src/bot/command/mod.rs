//! Slash commands.
//!
//! Every reply is an ephemeral embed: green for success, red for errors.

pub mod log_channel;
pub mod temprole;

use serenity::all::{
    Command, CommandInteraction, Context, CreateCommand, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use crate::error::AppError;

pub const SUCCESS_COLOUR: u32 = 0x77B255;
pub const ERROR_COLOUR: u32 = 0xE02B2B;

/// Definitions of every command the bot offers.
pub fn all() -> Vec<CreateCommand> {
    vec![temprole::register(), log_channel::register()]
}

/// Registers the global slash commands, replacing any previous set.
pub async fn register(ctx: &Context) -> Result<(), AppError> {
    let commands = Command::set_global_commands(&ctx.http, all()).await?;

    tracing::info!("Registered {} slash commands", commands.len());

    Ok(())
}

pub fn success_embed(description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(description)
        .color(SUCCESS_COLOUR)
}

pub fn error_embed(description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(description)
        .color(ERROR_COLOUR)
}

/// Replies to a command with an ephemeral embed.
pub async fn respond(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
) -> Result<(), AppError> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}
