use super::*;

/// Tests that shutdown cancels every pending timer.
///
/// Expected: Ok with an empty timer registry and grants left in the database
#[tokio::test]
async fn cancels_timers_and_keeps_grants() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let key = TempRoleKey::new(1, 42, 7);
    let repo = TempRoleRepository::new(db);
    repo.put(&key, T0 + 600).await?;

    let runtime = TempRoleRuntime::start(
        db.clone(),
        Arc::new(EmptyDirectory),
        Arc::new(ManualClock::at(T0)),
        &config(&[("TEMP_ROLE_SCHEDULER", "timer")]),
    )
    .await?;

    runtime.shutdown().await?;

    assert!(runtime.service().timers().unwrap().is_empty());
    assert!(repo.find(&key).await?.is_some());

    Ok(())
}

/// Tests that shutting down twice is harmless.
///
/// Expected: Ok both times
#[tokio::test(flavor = "multi_thread")]
async fn second_shutdown_is_noop() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let runtime = TempRoleRuntime::start(
        db.clone(),
        Arc::new(EmptyDirectory),
        Arc::new(ManualClock::at(T0)),
        &config(&[]),
    )
    .await?;

    runtime.shutdown().await?;
    runtime.shutdown().await?;

    Ok(())
}
