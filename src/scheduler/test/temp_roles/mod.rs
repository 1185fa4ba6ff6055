use std::sync::Arc;

use serenity::{
    all::{GuildId, RoleId, UserId},
    async_trait,
};
use test_utils::builder::TestBuilder;

use crate::{
    config::Config,
    data::temp_role::TempRoleRepository,
    error::AppError,
    model::temp_role::TempRoleKey,
    scheduler::temp_roles::TempRoleRuntime,
    service::discord::directory::{GuildDirectory, GuildMember, Lookup},
    util::clock::ManualClock,
};

mod shutdown;
mod start;

const T0: i64 = 1_700_000_000;

/// Directory for a bot that has left every guild.
struct EmptyDirectory;

#[async_trait]
impl GuildDirectory for EmptyDirectory {
    async fn resolve_guild(&self, _guild_id: GuildId) -> Result<Lookup<String>, AppError> {
        Ok(Lookup::NotFound)
    }

    async fn resolve_member(
        &self,
        _guild_id: GuildId,
        _user_id: UserId,
    ) -> Result<Lookup<GuildMember>, AppError> {
        Ok(Lookup::NotFound)
    }

    async fn resolve_role(
        &self,
        _guild_id: GuildId,
        _role_id: RoleId,
    ) -> Result<Lookup<String>, AppError> {
        Ok(Lookup::NotFound)
    }

    async fn revoke_role(&self, _member: &GuildMember, _role_id: RoleId) -> Result<(), AppError> {
        Ok(())
    }
}

fn config(vars: &[(&str, &str)]) -> Config {
    let mut all = vec![
        ("DATABASE_URL", "sqlite::memory:"),
        ("DISCORD_BOT_TOKEN", "token"),
    ];
    all.extend_from_slice(vars);

    Config::from_lookup(|name| {
        all.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    })
    .unwrap()
}
