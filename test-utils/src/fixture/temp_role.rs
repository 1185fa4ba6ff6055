//! Fixture for temporary role grant test data.

use entity::temp_role;

/// Default test guild ID.
pub const DEFAULT_GUILD_ID: i64 = 1;

/// Default test user ID.
pub const DEFAULT_USER_ID: i64 = 42;

/// Default test role ID.
pub const DEFAULT_ROLE_ID: i64 = 7;

/// Default expiry, 90 seconds after `DEFAULT_GRANTED_AT`.
pub const DEFAULT_EXPIRES_AT: i64 = DEFAULT_GRANTED_AT + 90;

/// Reference "now" used by tests that need a fixed grant time.
pub const DEFAULT_GRANTED_AT: i64 = 1_700_000_000;

/// Creates a temporary role entity model with default values.
///
/// # Returns
/// - `temp_role::Model` - In-memory entity (guild 1, user 42, role 7)
pub fn entity() -> temp_role::Model {
    entity_builder().build()
}

/// Creates a customizable temporary role entity builder.
///
/// # Example
/// ```rust,ignore
/// let entity = fixture::temp_role::entity_builder()
///     .user_id(43)
///     .expires_at(1_700_003_600)
///     .build();
/// ```
pub fn entity_builder() -> TempRoleEntityBuilder {
    TempRoleEntityBuilder::default()
}

/// Builder for temporary role entity models.
pub struct TempRoleEntityBuilder {
    guild_id: i64,
    user_id: i64,
    role_id: i64,
    expires_at: i64,
}

impl Default for TempRoleEntityBuilder {
    fn default() -> Self {
        Self {
            guild_id: DEFAULT_GUILD_ID,
            user_id: DEFAULT_USER_ID,
            role_id: DEFAULT_ROLE_ID,
            expires_at: DEFAULT_EXPIRES_AT,
        }
    }
}

impl TempRoleEntityBuilder {
    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: i64) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Sets the user ID.
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the role ID.
    pub fn role_id(mut self, role_id: i64) -> Self {
        self.role_id = role_id;
        self
    }

    /// Sets the expiry as a Unix timestamp in seconds.
    pub fn expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> temp_role::Model {
        temp_role::Model {
            guild_id: self.guild_id,
            user_id: self.user_id,
            role_id: self.role_id,
            expires_at: self.expires_at,
        }
    }
}
