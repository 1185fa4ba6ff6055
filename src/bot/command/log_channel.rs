//! `/logchannel [channel]` - sets or clears the moderation log channel.

use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, Permissions, ResolvedValue,
};

use crate::{
    bot::{
        command::{error_embed, respond, success_embed},
        handler::Handler,
    },
    error::AppError,
    model::guild_config::UpdateGuildConfigParam,
};

pub const NAME: &str = "logchannel";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Set the channel for moderation logs, or leave empty to disable them")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Channel,
                "channel",
                "Channel that receives moderation logs",
            )
            .channel_types(vec![ChannelType::Text]),
        )
}

pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = command.guild_id else {
        return respond(ctx, command, error_embed("This command only works in a server.")).await;
    };

    let channel_id = command
        .data
        .options()
        .into_iter()
        .find_map(|option| match (option.name, option.value) {
            ("channel", ResolvedValue::Channel(channel)) => Some(channel.id),
            _ => None,
        });

    let param = UpdateGuildConfigParam {
        log_channel_id: Some(channel_id.map(|id| id.get())),
        ..Default::default()
    };

    if let Err(e) = handler.guild_configs.update(guild_id.get(), param).await {
        tracing::error!("Failed to update log channel for guild {}: {}", guild_id, e);
        return respond(ctx, command, error_embed("Couldn't save the log channel.")).await;
    }

    let message = match channel_id {
        Some(channel_id) => format!("Moderation logs will be posted in <#{}>.", channel_id),
        None => "Moderation logging disabled.".to_string(),
    };

    respond(ctx, command, success_embed(message)).await
}
