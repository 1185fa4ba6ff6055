//! Temporary role repository, the durable store of pending grants.
//!
//! The `temp_role` table is the source of truth for every temporary grant. The scheduler in
//! either mode is only a derived view of this table and can always be rebuilt from it.
//!
//! Every statement runs in autocommit mode, so a call that returns `Ok` has been committed
//! and survives a crash immediately afterwards.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::temp_role::{TempRole, TempRoleKey};

/// Repository for temporary role grants.
pub struct TempRoleRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> TempRoleRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a grant or replaces the expiry of an existing grant for the same key.
    ///
    /// Runs as a single `INSERT ... ON CONFLICT DO UPDATE` statement, so no partial write is
    /// ever visible and repeating the call with the same arguments changes nothing.
    ///
    /// # Arguments
    /// - `key` - Identity of the grant
    /// - `expires_at` - Unix timestamp (seconds) at which the role must be removed
    ///
    /// # Returns
    /// - `Ok(())` - Grant stored and committed
    /// - `Err(DbErr)` - Database error during the upsert
    pub async fn put(&self, key: &TempRoleKey, expires_at: i64) -> Result<(), DbErr> {
        entity::prelude::TempRole::insert(entity::temp_role::ActiveModel {
            guild_id: ActiveValue::Set(key.guild_id as i64),
            user_id: ActiveValue::Set(key.user_id as i64),
            role_id: ActiveValue::Set(key.role_id as i64),
            expires_at: ActiveValue::Set(expires_at),
        })
        .on_conflict(
            OnConflict::columns([
                entity::temp_role::Column::GuildId,
                entity::temp_role::Column::UserId,
                entity::temp_role::Column::RoleId,
            ])
            .update_column(entity::temp_role::Column::ExpiresAt)
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Finds the grant stored for a key.
    ///
    /// # Returns
    /// - `Ok(Some(TempRole))` - Grant exists
    /// - `Ok(None)` - No grant for this key
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(&self, key: &TempRoleKey) -> Result<Option<TempRole>, DbErr> {
        let entity = entity::prelude::TempRole::find_by_id((
            key.guild_id as i64,
            key.user_id as i64,
            key.role_id as i64,
        ))
        .one(self.db)
        .await?;

        Ok(entity.map(TempRole::from_entity))
    }

    /// Gets every stored grant, soonest expiry first.
    ///
    /// Used at startup to re-arm timers. Expected volume is hundreds to low thousands of
    /// rows, so no pagination.
    ///
    /// # Returns
    /// - `Ok(Vec<TempRole>)` - All grants
    /// - `Err(DbErr)` - Database error during query
    pub async fn list_all(&self) -> Result<Vec<TempRole>, DbErr> {
        let entities = entity::prelude::TempRole::find()
            .order_by_asc(entity::temp_role::Column::ExpiresAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(TempRole::from_entity).collect())
    }

    /// Gets grants whose expiry is at or before `as_of`, soonest expiry first.
    ///
    /// # Arguments
    /// - `as_of` - Unix timestamp (seconds); grants with `expires_at <= as_of` are returned
    ///
    /// # Returns
    /// - `Ok(Vec<TempRole>)` - Expired grants
    /// - `Err(DbErr)` - Database error during query
    pub async fn list_expired(&self, as_of: i64) -> Result<Vec<TempRole>, DbErr> {
        let entities = entity::prelude::TempRole::find()
            .filter(entity::temp_role::Column::ExpiresAt.lte(as_of))
            .order_by_asc(entity::temp_role::Column::ExpiresAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(TempRole::from_entity).collect())
    }

    /// Deletes the grant for a key.
    ///
    /// No-op if the grant doesn't exist, so repeated cleanup after a crash-restart race is
    /// harmless.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - No row existed
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn delete(&self, key: &TempRoleKey) -> Result<bool, DbErr> {
        let result = entity::prelude::TempRole::delete_many()
            .filter(entity::temp_role::Column::GuildId.eq(key.guild_id as i64))
            .filter(entity::temp_role::Column::UserId.eq(key.user_id as i64))
            .filter(entity::temp_role::Column::RoleId.eq(key.role_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
