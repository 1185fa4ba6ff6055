use std::fmt;
use std::time::Duration;

use serenity::all::{GuildId, RoleId, UserId};

/// Identity of a temporary grant: which role, held by which member, in which guild.
///
/// At most one pending grant exists per key, both in the database and in the timer registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempRoleKey {
    pub guild_id: u64,
    pub user_id: u64,
    pub role_id: u64,
}

impl TempRoleKey {
    pub fn new(guild_id: u64, user_id: u64, role_id: u64) -> Self {
        Self {
            guild_id,
            user_id,
            role_id,
        }
    }

    /// Typed Discord IDs for this key.
    ///
    /// Returns `None` when any component is zero, which no Discord entity can have. Serenity's
    /// ID constructors panic on zero, so callers must go through this.
    pub fn discord_ids(&self) -> Option<(GuildId, UserId, RoleId)> {
        if self.guild_id == 0 || self.user_id == 0 || self.role_id == 0 {
            return None;
        }

        Some((
            GuildId::new(self.guild_id),
            UserId::new(self.user_id),
            RoleId::new(self.role_id),
        ))
    }
}

impl fmt::Display for TempRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "role {} of user {} in guild {}",
            self.role_id, self.user_id, self.guild_id
        )
    }
}

/// A pending temporary role grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempRole {
    pub key: TempRoleKey,
    /// Unix timestamp (seconds, UTC) at which the role must be removed.
    pub expires_at: i64,
}

impl TempRole {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Snowflakes are stored as `i64`; the cast back to `u64` is bit-preserving, so a key read
    /// from the database always addresses the same row when written back.
    pub fn from_entity(entity: entity::temp_role::Model) -> Self {
        Self {
            key: TempRoleKey::new(
                entity.guild_id as u64,
                entity.user_id as u64,
                entity.role_id as u64,
            ),
            expires_at: entity.expires_at,
        }
    }

    /// Time left until expiry as seen at `now`, clamped to zero once expired.
    pub fn remaining(&self, now: i64) -> Duration {
        Duration::from_secs(self.expires_at.saturating_sub(now).max(0) as u64)
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}
