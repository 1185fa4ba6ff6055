use super::*;

/// Tests that timer-mode recovery arms every stored grant.
///
/// Expected: Ok(2) with a timer per grant at its stored expiry
#[tokio::test]
async fn arms_timer_for_each_grant() -> Result<(), AppError> {
    let harness = Harness::timer_mode(FakeDirectory::with_default_member()).await;

    let first = factory::temp_role::TempRoleFactory::new(&harness.db)
        .expires_at(T0 + 600)
        .build()
        .await?;
    let second = factory::temp_role::TempRoleFactory::new(&harness.db)
        .expires_at(T0 + 1200)
        .build()
        .await?;

    let armed = harness.service.recover().await?;

    assert_eq!(armed, 2);
    let first_key = TempRoleKey::new(
        first.guild_id as u64,
        first.user_id as u64,
        first.role_id as u64,
    );
    let second_key = TempRoleKey::new(
        second.guild_id as u64,
        second.user_id as u64,
        second.role_id as u64,
    );
    assert_eq!(harness.timers().armed_expiry(&first_key), Some(T0 + 600));
    assert_eq!(harness.timers().armed_expiry(&second_key), Some(T0 + 1200));

    harness.service.shutdown();
    assert!(harness.timers().is_empty());

    Ok(())
}

/// Tests that timer-mode recovery removes grants that expired while offline.
///
/// Expected: role revoked and row deleted without any further calls
#[tokio::test]
async fn removes_grants_expired_while_offline() -> Result<(), AppError> {
    let harness = Harness::timer_mode(FakeDirectory::with_default_member()).await;

    harness.repo().put(&key(), T0 - 3600).await?;

    harness.service.recover().await?;
    harness.wait_until_removed(&key()).await;

    assert_eq!(harness.directory.revocations(), vec![key()]);
    assert!(harness.timers().is_empty());

    Ok(())
}

/// Tests that sweep-mode recovery runs an immediate sweep.
///
/// Expected: Ok(1) with the overdue grant removed and the future grant kept
#[tokio::test]
async fn sweeps_immediately_in_sweep_mode() -> Result<(), AppError> {
    let harness = Harness::sweep_mode(FakeDirectory::with_default_member()).await;

    harness.repo().put(&key(), T0 - 3600).await?;
    let future = TempRoleKey::new(GUILD, USER, 8);
    harness.repo().put(&future, T0 + 3600).await?;

    let due = harness.service.recover().await?;

    assert_eq!(due, 1);
    assert_eq!(harness.directory.revocations(), vec![key()]);
    assert!(harness.repo().find(&future).await?.is_some());

    Ok(())
}

/// Tests a grant made in timer mode being removed when its timer fires.
///
/// Expected: role revoked and row deleted once the delay elapses
#[tokio::test]
async fn timer_removes_grant_at_expiry() -> Result<(), AppError> {
    let harness = Harness::timer_mode(FakeDirectory::with_default_member()).await;

    harness
        .service
        .add_temp_role(GUILD, USER, ROLE, Duration::from_secs(1))
        .await?;
    harness.wait_until_removed(&key()).await;

    assert_eq!(harness.directory.revocations(), vec![key()]);

    Ok(())
}
