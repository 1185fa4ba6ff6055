use super::*;

/// Tests invalidating a single guild.
///
/// Verifies that only the named guild is reloaded.
///
/// Expected: Ok with guild 1 reloaded and guild 2 still cached
#[tokio::test]
async fn invalidates_one_guild() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let service = service(db);
    service.get(1).await?;
    service.get(2).await?;

    let repo = GuildConfigRepository::new(db);
    repo.update(1, set_prefix("$")).await?;
    repo.update(2, set_prefix("$")).await?;

    service.invalidate(Some(1)).await;

    assert_eq!(service.get(1).await?.prefix, "$");
    assert_eq!(service.get(2).await?.prefix, "!");

    Ok(())
}

/// Tests invalidating every guild.
///
/// Expected: Ok with an empty cache and fresh values on the next read
#[tokio::test]
async fn invalidates_all_guilds() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let service = service(db);
    service.get(1).await?;
    service.get(2).await?;
    assert_eq!(service.stats().await.entries, 2);

    GuildConfigRepository::new(db)
        .update(2, set_prefix("$"))
        .await?;

    service.invalidate(None).await;
    assert_eq!(service.stats().await.entries, 0);

    assert_eq!(service.get(2).await?.prefix, "$");

    Ok(())
}

/// Tests that stats report the configured TTL.
///
/// Expected: 300 seconds
#[tokio::test]
async fn stats_report_ttl() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let stats = service(db).stats().await;

    assert_eq!(stats.ttl_seconds, 300);
    assert_eq!(stats.entries, 0);

    Ok(())
}
