//! `/temprole member role duration` - gives a member a role that is removed automatically.

use std::time::Duration;

use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    Permissions, ResolvedOption, ResolvedValue, RoleId, UserId,
};

use crate::{
    bot::{
        command::{error_embed, respond, success_embed},
        handler::Handler,
    },
    error::AppError,
    service::moderation_log::ModerationAction,
};

pub const NAME: &str = "temprole";

/// One year.
pub const MAX_DURATION_MINUTES: i64 = 525_600;

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Give a member a role that is removed automatically")
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "member", "Member to give the role")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Role, "role", "Role to give").required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "duration",
                "How long the member keeps the role, in minutes",
            )
            .required(true)
            .min_int_value(1)
            .max_int_value(MAX_DURATION_MINUTES as u64),
        )
}

struct TempRoleArgs {
    user_id: UserId,
    role_id: RoleId,
    minutes: i64,
}

fn parse_args(options: &[ResolvedOption<'_>]) -> Option<TempRoleArgs> {
    let mut user_id = None;
    let mut role_id = None;
    let mut minutes = None;

    for option in options {
        match (option.name, &option.value) {
            ("member", ResolvedValue::User(user, _)) => user_id = Some(user.id),
            ("role", ResolvedValue::Role(role)) => role_id = Some(role.id),
            ("duration", ResolvedValue::Integer(value)) => minutes = Some(*value),
            _ => {}
        }
    }

    Some(TempRoleArgs {
        user_id: user_id?,
        role_id: role_id?,
        minutes: minutes?,
    })
}

/// Checks a duration in minutes and converts it.
///
/// Discord enforces the same bounds on the option, but the value still comes from the
/// client.
pub fn validate_duration_minutes(minutes: i64) -> Result<Duration, String> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(format!(
            "Duration must be between 1 and {} minutes.",
            MAX_DURATION_MINUTES
        ));
    }

    Ok(Duration::from_secs(minutes as u64 * 60))
}

/// Runs `/temprole`.
///
/// Adds the role on Discord first and then records the grant. If recording fails the role
/// is taken away again, so a member never keeps a role nothing will remove.
pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = command.guild_id else {
        return respond(ctx, command, error_embed("This command only works in a server.")).await;
    };

    let Some(args) = parse_args(&command.data.options()) else {
        return respond(ctx, command, error_embed("Missing command options.")).await;
    };

    let duration = match validate_duration_minutes(args.minutes) {
        Ok(duration) => duration,
        Err(message) => return respond(ctx, command, error_embed(message)).await,
    };

    let Some(runtime) = handler.runtime.get() else {
        return respond(
            ctx,
            command,
            error_embed("The bot is still starting up. Try again in a moment."),
        )
        .await;
    };

    let member = match ctx.http.get_member(guild_id, args.user_id).await {
        Ok(member) => member,
        Err(e) => {
            tracing::debug!("Failed to fetch member {}: {}", args.user_id, e);
            return respond(
                ctx,
                command,
                error_embed("That user is not a member of this server."),
            )
            .await;
        }
    };

    if member.roles.contains(&args.role_id) {
        return respond(
            ctx,
            command,
            error_embed(format!(
                "<@{}> already has <@&{}>.",
                args.user_id, args.role_id
            )),
        )
        .await;
    }

    let reason = format!("Temporary role for {} minutes", args.minutes);
    if let Err(e) = ctx
        .http
        .add_member_role(guild_id, args.user_id, args.role_id, Some(reason.as_str()))
        .await
    {
        tracing::warn!(
            "Failed to add role {} to {} in guild {}: {}",
            args.role_id,
            args.user_id,
            guild_id,
            e
        );
        return respond(
            ctx,
            command,
            error_embed("I couldn't add that role. Make sure my role is above it."),
        )
        .await;
    }

    if let Err(e) = runtime
        .service()
        .add_temp_role(
            guild_id.get(),
            args.user_id.get(),
            args.role_id.get(),
            duration,
        )
        .await
    {
        tracing::error!("Failed to record temporary role: {}", e);

        if let Err(e) = ctx
            .http
            .remove_member_role(
                guild_id,
                args.user_id,
                args.role_id,
                Some("Temporary role could not be saved"),
            )
            .await
        {
            tracing::error!(
                "Failed to roll back role {} for {} in guild {}: {}",
                args.role_id,
                args.user_id,
                guild_id,
                e
            );
        }

        return respond(
            ctx,
            command,
            error_embed("Couldn't save the temporary role, so it was removed again."),
        )
        .await;
    }

    let expires_at = Utc::now().timestamp() + duration.as_secs() as i64;
    respond(
        ctx,
        command,
        success_embed(format!(
            "<@{}> has <@&{}> until <t:{}:f> (<t:{}:R>).",
            args.user_id, args.role_id, expires_at, expires_at
        )),
    )
    .await?;

    let action = ModerationAction {
        guild_id: guild_id.get(),
        action: "Temp Role".to_string(),
        moderator_id: command.user.id.get(),
        target_id: args.user_id.get(),
        reason: None,
        extra_info: Some(format!(
            "<@&{}> for {} minutes",
            args.role_id, args.minutes
        )),
    };

    if let Err(e) = handler
        .moderation_log
        .log_action(&ctx.http, &action)
        .await
    {
        tracing::warn!("Failed to write moderation log for guild {}: {}", guild_id, e);
    }

    Ok(())
}
