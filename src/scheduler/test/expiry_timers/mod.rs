use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{model::temp_role::TempRoleKey, scheduler::expiry_timers::ExpiryTimers};

mod arm;

/// Counter incremented each time a timer action runs.
#[derive(Clone, Default)]
struct Fired(Arc<AtomicUsize>);

impl Fired {
    fn action(&self) -> impl FnOnce() -> std::future::Ready<()> + Send + 'static {
        let count = self.0.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn key() -> TempRoleKey {
    TempRoleKey::new(1, 42, 7)
}
