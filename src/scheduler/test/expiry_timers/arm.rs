use super::*;

/// Tests that a timer fires at its expiry and not before.
///
/// Expected: no action at 60s, one action after 90s, entry forgotten
#[tokio::test(start_paused = true)]
async fn fires_after_delay() {
    let timers = ExpiryTimers::new();
    let fired = Fired::default();

    timers.arm(key(), 90, Duration::from_secs(90), fired.action());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(fired.count(), 0);
    assert_eq!(timers.armed_expiry(&key()), Some(90));

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(fired.count(), 1);
    assert!(timers.is_empty());
}

/// Tests that arming the same key twice leaves a single timer.
///
/// Verifies that the first timer is cancelled and never fires, even after its original
/// delay has elapsed.
///
/// Expected: one entry, only the second action runs
#[tokio::test(start_paused = true)]
async fn rearming_replaces_previous_timer() {
    let timers = ExpiryTimers::new();
    let first = Fired::default();
    let second = Fired::default();

    timers.arm(key(), 10, Duration::from_secs(10), first.action());
    timers.arm(key(), 100, Duration::from_secs(100), second.action());

    assert_eq!(timers.len(), 1);
    assert_eq!(timers.armed_expiry(&key()), Some(100));

    tokio::time::sleep(Duration::from_secs(50)).await;
    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 0);

    tokio::time::sleep(Duration::from_secs(51)).await;
    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 1);
}

/// Tests that a zero delay fires right away.
///
/// Recovery arms past-expiry grants with a zero delay.
///
/// Expected: action runs without waiting
#[tokio::test(start_paused = true)]
async fn zero_delay_fires_immediately() {
    let timers = ExpiryTimers::new();
    let fired = Fired::default();

    timers.arm(key(), 0, Duration::ZERO, fired.action());

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(fired.count(), 1);
    assert!(timers.is_empty());
}

/// Tests that the firing timer forgets its entry before running the action.
///
/// Expected: action observes no armed entry for its own key
#[tokio::test(start_paused = true)]
async fn entry_is_forgotten_before_action_runs() {
    let timers = Arc::new(ExpiryTimers::new());
    let observed = Arc::new(std::sync::Mutex::new(None));

    let registry = timers.clone();
    let seen = observed.clone();
    timers.arm(key(), 5, Duration::from_secs(5), move || async move {
        *seen.lock().unwrap() = Some(registry.armed_expiry(&key()));
    });

    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(*observed.lock().unwrap(), Some(None));
}

/// Tests that timers for different keys are independent.
///
/// Expected: each fires at its own expiry
#[tokio::test(start_paused = true)]
async fn keys_fire_independently() {
    let timers = ExpiryTimers::new();
    let early = Fired::default();
    let late = Fired::default();

    timers.arm(TempRoleKey::new(1, 42, 7), 10, Duration::from_secs(10), early.action());
    timers.arm(TempRoleKey::new(1, 42, 8), 20, Duration::from_secs(20), late.action());
    assert_eq!(timers.len(), 2);

    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(early.count(), 1);
    assert_eq!(late.count(), 0);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(late.count(), 1);
}
