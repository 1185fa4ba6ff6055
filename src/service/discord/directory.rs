//! Discord lookups needed to revoke an expired temporary role.
//!
//! The removal path only needs to answer four questions: does the guild still exist, is the
//! user still a member, does the role still exist, and can the role be taken away. The
//! `GuildDirectory` trait captures exactly that so the removal logic can be exercised without
//! a gateway connection.
//!
//! `SerenityDirectory` answers from the gateway cache when it can and falls back to the REST
//! API otherwise. A Discord 404 becomes `Lookup::NotFound`; any other failure is an error.

use std::sync::Arc;

use serenity::{
    all::{GuildId, Member, RoleId, UserId},
    async_trait,
    cache::Cache,
    http::{Http, HttpError},
};

use crate::error::AppError;

/// Audit log reason attached to every expiry removal.
pub const EXPIRY_REASON: &str = "Temporary role expired";

/// Outcome of a Discord lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// The parts of a guild member the removal path needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub roles: Vec<RoleId>,
}

impl GuildMember {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

impl From<&Member> for GuildMember {
    fn from(member: &Member) -> Self {
        Self {
            guild_id: member.guild_id,
            user_id: member.user.id,
            roles: member.roles.clone(),
        }
    }
}

/// Read access to guilds, members and roles, plus role revocation.
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Resolves a guild, returning its name.
    async fn resolve_guild(&self, guild_id: GuildId) -> Result<Lookup<String>, AppError>;

    /// Resolves a member of a guild.
    async fn resolve_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Lookup<GuildMember>, AppError>;

    /// Resolves a role of a guild, returning its name.
    async fn resolve_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Lookup<String>, AppError>;

    /// Removes a role from a member.
    async fn revoke_role(&self, member: &GuildMember, role_id: RoleId) -> Result<(), AppError>;
}

/// `GuildDirectory` backed by serenity's cache and HTTP client.
#[derive(Clone)]
pub struct SerenityDirectory {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityDirectory {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }
}

#[async_trait]
impl GuildDirectory for SerenityDirectory {
    async fn resolve_guild(&self, guild_id: GuildId) -> Result<Lookup<String>, AppError> {
        let cached = self.cache.guild(guild_id).map(|guild| guild.name.clone());
        if let Some(name) = cached {
            return Ok(Lookup::Found(name));
        }

        match self.http.get_guild(guild_id).await {
            Ok(guild) => Ok(Lookup::Found(guild.name)),
            Err(e) if is_not_found(&e) => Ok(Lookup::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Lookup<GuildMember>, AppError> {
        let cached = self
            .cache
            .member(guild_id, user_id)
            .map(|member| GuildMember::from(&*member));
        if let Some(member) = cached {
            return Ok(Lookup::Found(member));
        }

        match self.http.get_member(guild_id, user_id).await {
            Ok(member) => Ok(Lookup::Found(GuildMember::from(&member))),
            Err(e) if is_not_found(&e) => Ok(Lookup::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Lookup<String>, AppError> {
        // A cached guild carries its full role list, so a miss there is authoritative.
        let cached = self
            .cache
            .guild(guild_id)
            .map(|guild| guild.roles.get(&role_id).map(|role| role.name.clone()));
        match cached {
            Some(Some(name)) => return Ok(Lookup::Found(name)),
            Some(None) => return Ok(Lookup::NotFound),
            None => {}
        }

        match self.http.get_guild_roles(guild_id).await {
            Ok(roles) => Ok(roles
                .into_iter()
                .find(|role| role.id == role_id)
                .map(|role| Lookup::Found(role.name))
                .unwrap_or(Lookup::NotFound)),
            Err(e) if is_not_found(&e) => Ok(Lookup::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn revoke_role(&self, member: &GuildMember, role_id: RoleId) -> Result<(), AppError> {
        self.http
            .remove_member_role(member.guild_id, member.user_id, role_id, Some(EXPIRY_REASON))
            .await?;

        Ok(())
    }
}

/// Whether a serenity error is Discord reporting an unknown entity.
fn is_not_found(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}
