//! In-memory registry of per-grant expiry timers.
//!
//! Each armed key owns one spawned task that sleeps until the grant's expiry and then runs
//! the removal action. The registry is a rebuildable view of the `temp_role` table: nothing
//! here is persisted, and startup recovery re-arms every stored grant.
//!
//! Entries carry a generation number. A task that wakes up only fires if the registry still
//! holds its generation for the key, and it removes that entry before running the action, so
//! an action in progress can't be aborted by a later re-arm and a replaced timer never fires.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::model::temp_role::TempRoleKey;

struct TimerEntry {
    generation: u64,
    expires_at: i64,
    handle: AbortHandle,
}

type Entries = Arc<Mutex<HashMap<TempRoleKey, TimerEntry>>>;

/// Registry of pending expiry timers, at most one per key.
#[derive(Default)]
pub struct ExpiryTimers {
    entries: Entries,
    next_generation: AtomicU64,
}

impl ExpiryTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run once `delay` has elapsed.
    ///
    /// Any timer already armed for `key` is aborted and replaced. Replacement and insertion
    /// happen under one lock, so there is never a moment with two live timers for a key.
    ///
    /// # Arguments
    /// - `key` - Grant the timer belongs to
    /// - `expires_at` - Unix timestamp recorded for inspection via `armed_expiry`
    /// - `delay` - Time to wait before firing; zero fires on the next scheduler pass
    /// - `action` - Removal to run when the timer fires
    pub fn arm<F, Fut>(&self, key: TempRoleKey, expires_at: i64, delay: Duration, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.lock();

        if let Some(previous) = entries.remove(&key) {
            previous.handle.abort();
            tracing::debug!("Replaced expiry timer for {}", key);
        }

        let registry = Arc::clone(&self.entries);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut entries = registry.lock().unwrap_or_else(PoisonError::into_inner);
                match entries.get(&key) {
                    Some(entry) if entry.generation == generation => {
                        entries.remove(&key);
                    }
                    _ => return,
                }
            }

            action().await;
        })
        .abort_handle();

        entries.insert(
            key,
            TimerEntry {
                generation,
                expires_at,
                handle,
            },
        );
    }

    /// Cancels and forgets the timer for `key`.
    ///
    /// # Returns
    /// - `true` - A pending timer was cancelled
    /// - `false` - Nothing was armed for the key
    pub fn disarm(&self, key: &TempRoleKey) -> bool {
        match self.lock().remove(key) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer.
    ///
    /// Timers whose action is already running are no longer in the registry and finish
    /// normally.
    pub fn shutdown(&self) {
        let drained: Vec<TimerEntry> = self.lock().drain().map(|(_, entry)| entry).collect();

        for entry in &drained {
            entry.handle.abort();
        }

        tracing::info!("Cancelled {} pending expiry timers", drained.len());
    }

    /// Expiry recorded for the pending timer of `key`, if any.
    pub fn armed_expiry(&self, key: &TempRoleKey) -> Option<i64> {
        self.lock().get(key).map(|entry| entry.expires_at)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TempRoleKey, TimerEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
