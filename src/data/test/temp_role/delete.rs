use super::*;

/// Tests deleting an existing grant.
///
/// Verifies that only the matching row is removed.
///
/// Expected: Ok(true) and the other grant remains
#[tokio::test]
async fn deletes_matching_grant() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let target = factory::create_temp_role(db).await?;
    let other = factory::create_temp_role(db).await?;

    let repo = TempRoleRepository::new(db);
    let deleted = repo.delete(&key_of(&target)).await?;

    assert!(deleted);
    assert!(repo.find(&key_of(&target)).await?.is_none());
    assert!(repo.find(&key_of(&other)).await?.is_some());

    Ok(())
}

/// Tests deleting a grant that doesn't exist.
///
/// Cleanup after a lost race must not fail.
///
/// Expected: Ok(false)
#[tokio::test]
async fn missing_grant_is_noop() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = TempRoleRepository::new(db);
    let deleted = repo.delete(&TempRoleKey::new(1, 2, 3)).await?;

    assert!(!deleted);

    Ok(())
}

/// Tests that deleting twice is harmless.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn second_delete_reports_nothing_removed() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_temp_role_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let grant = factory::create_temp_role(db).await?;
    let key = key_of(&grant);

    let repo = TempRoleRepository::new(db);
    assert!(repo.delete(&key).await?);
    assert!(!repo.delete(&key).await?);

    Ok(())
}
