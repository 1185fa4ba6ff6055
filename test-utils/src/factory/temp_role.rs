//! Factory for creating temporary role grant test data.

use crate::{factory::helpers::next_id, fixture};
use entity::temp_role;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for building temporary role grants with custom values.
///
/// Defaults come from `fixture::temp_role`, except the user ID which is unique per factory
/// so several grants can coexist without colliding on the primary key.
pub struct TempRoleFactory<'a> {
    db: &'a DatabaseConnection,
    entity: temp_role::Model,
}

impl<'a> TempRoleFactory<'a> {
    /// Creates a new factory instance with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let entity = fixture::temp_role::entity_builder()
            .user_id(next_id() as i64)
            .build();

        Self { db, entity }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: i64) -> Self {
        self.entity.guild_id = guild_id;
        self
    }

    /// Sets the user ID.
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.entity.user_id = user_id;
        self
    }

    /// Sets the role ID.
    pub fn role_id(mut self, role_id: i64) -> Self {
        self.entity.role_id = role_id;
        self
    }

    /// Sets the expiry as a Unix timestamp in seconds.
    pub fn expires_at(mut self, expires_at: i64) -> Self {
        self.entity.expires_at = expires_at;
        self
    }

    /// Builds and inserts the grant.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created grant
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<temp_role::Model, DbErr> {
        temp_role::ActiveModel {
            guild_id: ActiveValue::Set(self.entity.guild_id),
            user_id: ActiveValue::Set(self.entity.user_id),
            role_id: ActiveValue::Set(self.entity.role_id),
            expires_at: ActiveValue::Set(self.entity.expires_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a temporary role grant with default values and a unique user ID.
///
/// # Example
/// ```rust,ignore
/// let grant = factory::temp_role::create_temp_role(&db).await?;
/// ```
pub async fn create_temp_role(db: &DatabaseConnection) -> Result<temp_role::Model, DbErr> {
    TempRoleFactory::new(db).build().await
}

/// Creates a temporary role grant with a unique user ID and the given expiry.
///
/// # Arguments
/// - `db` - Database connection for inserting the entity
/// - `expires_at` - Unix timestamp in seconds
pub async fn create_temp_role_expiring_at(
    db: &DatabaseConnection,
    expires_at: i64,
) -> Result<temp_role::Model, DbErr> {
    TempRoleFactory::new(db).expires_at(expires_at).build().await
}
