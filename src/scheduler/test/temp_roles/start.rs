use super::*;

/// Tests that sweep mode sweeps once before the first scheduled tick.
///
/// Expected: overdue grant deleted, future grant kept
#[tokio::test(flavor = "multi_thread")]
async fn sweep_mode_sweeps_at_startup() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let overdue = TempRoleKey::new(1, 42, 7);
    let future = TempRoleKey::new(1, 42, 8);
    let repo = TempRoleRepository::new(db);
    repo.put(&overdue, T0 - 60).await?;
    repo.put(&future, T0 + 3600).await?;

    let runtime = TempRoleRuntime::start(
        db.clone(),
        Arc::new(EmptyDirectory),
        Arc::new(ManualClock::at(T0)),
        &config(&[]),
    )
    .await?;

    assert!(repo.find(&overdue).await?.is_none());
    assert!(repo.find(&future).await?.is_some());
    assert!(runtime.service().timers().is_none());

    runtime.shutdown().await?;

    Ok(())
}

/// Tests that timer mode arms every stored grant.
///
/// Expected: one timer per future grant
#[tokio::test]
async fn timer_mode_arms_stored_grants() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = TempRoleRepository::new(db);
    repo.put(&TempRoleKey::new(1, 42, 7), T0 + 600).await?;
    repo.put(&TempRoleKey::new(1, 43, 7), T0 + 1200).await?;

    let runtime = TempRoleRuntime::start(
        db.clone(),
        Arc::new(EmptyDirectory),
        Arc::new(ManualClock::at(T0)),
        &config(&[("TEMP_ROLE_SCHEDULER", "timer")]),
    )
    .await?;

    let timers = runtime.service().timers().unwrap();
    assert_eq!(timers.len(), 2);

    runtime.shutdown().await?;

    Ok(())
}

/// Tests that a malformed sweep schedule is rejected.
///
/// Expected: Err(AppError::SchedulerErr)
#[tokio::test(flavor = "multi_thread")]
async fn rejects_invalid_sweep_schedule() {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let result = TempRoleRuntime::start(
        db.clone(),
        Arc::new(EmptyDirectory),
        Arc::new(ManualClock::at(T0)),
        &config(&[("TEMP_ROLE_SWEEP_CRON", "every minute")]),
    )
    .await;

    assert!(matches!(result, Err(AppError::SchedulerErr(_))));
}
