//! Temporary role lifecycle: intake, expiry removal, sweeping and recovery.
//!
//! The `temp_role` table is authoritative. Pending removals are driven either by a periodic
//! sweep over expired rows or by one in-memory timer per grant, and both paths end in
//! `remove_expired`. Intake and removal for the same key are serialized by a keyed lock, and
//! removal re-reads the row under that lock, so a grant renewed after the sweep or timer
//! observed it is left alone.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{
    data::temp_role::TempRoleRepository,
    error::AppError,
    model::temp_role::TempRoleKey,
    scheduler::expiry_timers::ExpiryTimers,
    service::discord::directory::{GuildDirectory, Lookup},
    util::{clock::Clock, key_lock::KeyLocks},
};

/// How pending removals are driven.
#[derive(Clone)]
pub enum ExpiryMode {
    /// An external periodic job calls `sweep`.
    Sweep,
    /// One timer per grant, armed on intake and on recovery.
    Timers(Arc<ExpiryTimers>),
}

/// What `remove_expired` did with a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// No row for the key; another removal got there first.
    AlreadyGone,
    /// The row's expiry changed since it was scheduled; it was re-granted and is kept.
    Superseded,
    /// The row holds an ID of zero and can't address anything on Discord.
    Malformed,
    GuildMissing,
    MemberMissing,
    RoleMissing,
    Revoked,
    /// The member no longer had the role.
    NotHeld,
    /// A Discord lookup or the revoke call failed. Not retried.
    RevokeFailed,
}

impl RemovalOutcome {
    /// Whether the row was deleted.
    pub fn cleaned_up(&self) -> bool {
        !matches!(self, Self::AlreadyGone | Self::Superseded)
    }
}

/// Counts from one sweep run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Rows at or past their expiry when the sweep started.
    pub due: usize,
    pub revoked: usize,
    /// Rows deleted, revoked or not.
    pub cleaned_up: usize,
    /// Rows that failed with a database error and remain for the next sweep.
    pub failed: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: RemovalOutcome) {
        if outcome == RemovalOutcome::Revoked {
            self.revoked += 1;
        }
        if outcome.cleaned_up() {
            self.cleaned_up += 1;
        }
    }
}

/// Service owning temporary role grants.
///
/// Cheap to clone; clones share the key locks and timer registry.
#[derive(Clone)]
pub struct TempRoleService {
    db: DatabaseConnection,
    directory: Arc<dyn GuildDirectory>,
    clock: Arc<dyn Clock>,
    locks: Arc<KeyLocks>,
    mode: ExpiryMode,
}

impl TempRoleService {
    /// Creates a new TempRoleService.
    ///
    /// # Arguments
    /// - `db` - Database connection holding the `temp_role` table
    /// - `directory` - Discord lookups used when revoking
    /// - `clock` - Time source for expiry arithmetic
    /// - `mode` - Sweep or per-grant timers
    pub fn new(
        db: DatabaseConnection,
        directory: Arc<dyn GuildDirectory>,
        clock: Arc<dyn Clock>,
        mode: ExpiryMode,
    ) -> Self {
        Self {
            db,
            directory,
            clock,
            locks: Arc::new(KeyLocks::new()),
            mode,
        }
    }

    /// Timer registry when running in timer mode.
    pub fn timers(&self) -> Option<&Arc<ExpiryTimers>> {
        match &self.mode {
            ExpiryMode::Sweep => None,
            ExpiryMode::Timers(timers) => Some(timers),
        }
    }

    /// Records a temporary grant that expires `duration` from now.
    ///
    /// The caller must already have added the role on Discord. Granting a key that already
    /// has a pending grant replaces its expiry, and in timer mode replaces its timer.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the role belongs to
    /// - `user_id` - Member holding the role
    /// - `role_id` - Role to remove on expiry
    /// - `duration` - Lifetime of the grant, truncated to whole seconds
    ///
    /// # Returns
    /// - `Ok(())` - Grant committed and scheduled
    /// - `Err(AppError::DbErr)` - Grant could not be stored; nothing was scheduled
    pub async fn add_temp_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        duration: Duration,
    ) -> Result<(), AppError> {
        let key = TempRoleKey::new(guild_id, user_id, role_id);
        let expires_at = self
            .clock
            .unix_now()
            .saturating_add(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX));

        let _guard = self.locks.lock(key).await;

        TempRoleRepository::new(&self.db)
            .put(&key, expires_at)
            .await?;

        if let ExpiryMode::Timers(timers) = &self.mode {
            self.arm(timers, key, expires_at);
        }

        tracing::info!(
            "Granted temporary {} until {} ({}s)",
            key,
            expires_at,
            duration.as_secs()
        );

        Ok(())
    }

    /// Removes an expired grant: revokes the role if possible, then deletes the row.
    ///
    /// Revocation is best effort. A missing guild, member or role, a member who no longer
    /// has the role, and a failing Discord call all still delete the row, and none of them
    /// are retried.
    ///
    /// # Arguments
    /// - `key` - Grant to remove
    /// - `expected_expires_at` - Expiry the caller observed when it scheduled this removal
    ///
    /// # Returns
    /// - `Ok(RemovalOutcome)` - What happened to the grant
    /// - `Err(AppError::DbErr)` - Reading or deleting the row failed; the row may remain
    pub async fn remove_expired(
        &self,
        key: TempRoleKey,
        expected_expires_at: i64,
    ) -> Result<RemovalOutcome, AppError> {
        let _guard = self.locks.lock(key).await;
        let repo = TempRoleRepository::new(&self.db);

        let Some(stored) = repo.find(&key).await? else {
            tracing::debug!("Temporary {} already removed", key);
            return Ok(RemovalOutcome::AlreadyGone);
        };

        if stored.expires_at != expected_expires_at {
            tracing::debug!(
                "Temporary {} was renewed to {}, skipping removal",
                key,
                stored.expires_at
            );
            return Ok(RemovalOutcome::Superseded);
        }

        let outcome = self.revoke(&key).await;

        repo.delete(&key).await?;

        match outcome {
            RemovalOutcome::Revoked => tracing::info!("Removed expired temporary {}", key),
            RemovalOutcome::RevokeFailed => {
                tracing::warn!("Dropped expired temporary {} without revoking it", key)
            }
            other => tracing::info!("Cleaned up expired temporary {} ({:?})", key, other),
        }

        Ok(outcome)
    }

    /// Removes every grant whose expiry has passed.
    ///
    /// Rows that fail with a database error are logged and left for the next run. Runs may
    /// overlap; the per-key lock and re-check make the second removal of a row a no-op.
    ///
    /// # Returns
    /// - `Ok(SweepSummary)` - Counts for this run
    /// - `Err(AppError::DbErr)` - Listing expired rows failed
    pub async fn sweep(&self) -> Result<SweepSummary, AppError> {
        let now = self.clock.unix_now();
        let due = TempRoleRepository::new(&self.db).list_expired(now).await?;

        let mut summary = SweepSummary {
            due: due.len(),
            ..Default::default()
        };

        for grant in due {
            match self.remove_expired(grant.key, grant.expires_at).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Failed to remove expired temporary {}: {}", grant.key, e);
                }
            }
        }

        if summary.due > 0 {
            tracing::info!(
                "Temporary role sweep: {} due, {} revoked, {} cleaned up, {} failed",
                summary.due,
                summary.revoked,
                summary.cleaned_up,
                summary.failed
            );
        }

        Ok(summary)
    }

    /// Rebuilds pending removals from the database after startup.
    ///
    /// In timer mode every stored grant is armed, with grants already past their expiry
    /// firing immediately. In sweep mode this is a single immediate sweep.
    ///
    /// # Returns
    /// - `Ok(usize)` - Grants armed (timer mode) or found due (sweep mode)
    /// - `Err(AppError::DbErr)` - Reading the grants failed
    pub async fn recover(&self) -> Result<usize, AppError> {
        match &self.mode {
            ExpiryMode::Sweep => {
                let summary = self.sweep().await?;
                Ok(summary.due)
            }
            ExpiryMode::Timers(timers) => {
                let grants = TempRoleRepository::new(&self.db).list_all().await?;
                let now = self.clock.unix_now();
                let overdue = grants.iter().filter(|grant| grant.is_expired(now)).count();

                for grant in &grants {
                    self.arm(timers, grant.key, grant.expires_at);
                }

                tracing::info!(
                    "Armed {} temporary role timers ({} already expired)",
                    grants.len(),
                    overdue
                );

                Ok(grants.len())
            }
        }
    }

    /// Cancels pending timers. In-flight grants are recovered on next start.
    pub fn shutdown(&self) {
        if let ExpiryMode::Timers(timers) = &self.mode {
            timers.shutdown();
        }
    }

    fn arm(&self, timers: &ExpiryTimers, key: TempRoleKey, expires_at: i64) {
        let now = self.clock.unix_now();
        let delay = Duration::from_secs(expires_at.saturating_sub(now).max(0) as u64);
        let service = self.clone();

        timers.arm(key, expires_at, delay, move || async move {
            if let Err(e) = service.remove_expired(key, expires_at).await {
                tracing::error!("Failed to remove expired temporary {}: {}", key, e);
            }
        });
    }

    async fn revoke(&self, key: &TempRoleKey) -> RemovalOutcome {
        let Some((guild_id, user_id, role_id)) = key.discord_ids() else {
            tracing::warn!("Temporary {} has an invalid ID, discarding", key);
            return RemovalOutcome::Malformed;
        };

        match self.try_revoke(guild_id, user_id, role_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to revoke temporary {}: {}", key, e);
                RemovalOutcome::RevokeFailed
            }
        }
    }

    async fn try_revoke(
        &self,
        guild_id: serenity::all::GuildId,
        user_id: serenity::all::UserId,
        role_id: serenity::all::RoleId,
    ) -> Result<RemovalOutcome, AppError> {
        if !self.directory.resolve_guild(guild_id).await?.is_found() {
            return Ok(RemovalOutcome::GuildMissing);
        }

        let member = match self.directory.resolve_member(guild_id, user_id).await? {
            Lookup::Found(member) => member,
            Lookup::NotFound => return Ok(RemovalOutcome::MemberMissing),
        };

        if !self.directory.resolve_role(guild_id, role_id).await?.is_found() {
            return Ok(RemovalOutcome::RoleMissing);
        }

        if !member.has_role(role_id) {
            return Ok(RemovalOutcome::NotHeld);
        }

        self.directory.revoke_role(&member, role_id).await?;

        Ok(RemovalOutcome::Revoked)
    }
}
