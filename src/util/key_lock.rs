//! Per-key async mutual exclusion.
//!
//! Intake and removal for the same temporary role key must not interleave: a re-grant that
//! lands between the removal's re-check and its delete would otherwise be lost. Different
//! keys never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::model::temp_role::TempRoleKey;

type Slot = Arc<AsyncMutex<()>>;

/// Registry of per-key locks. Entries exist only while someone holds or awaits them.
#[derive(Default)]
pub struct KeyLocks {
    slots: Mutex<HashMap<TempRoleKey, Slot>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`.
    pub async fn lock(&self, key: TempRoleKey) -> KeyGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(key).or_default().clone()
        };

        let guard = slot.clone().lock_owned().await;

        KeyGuard {
            locks: self,
            key,
            slot,
            guard: Some(guard),
        }
    }

    /// Number of keys currently locked or awaited.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one key, released on drop.
pub struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: TempRoleKey,
    slot: Slot,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut slots = self
            .locks
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Map entry plus our handle; anyone else waiting holds a third reference.
        let unused = Arc::strong_count(&self.slot) == 2;
        let ours = slots
            .get(&self.key)
            .is_some_and(|slot| Arc::ptr_eq(slot, &self.slot));

        if unused && ours {
            slots.remove(&self.key);
        }
    }
}
