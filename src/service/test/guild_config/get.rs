use super::*;

/// Tests first read creates and caches a default configuration.
///
/// Expected: Ok with default prefix and one cached entry
#[tokio::test]
async fn loads_and_caches_on_miss() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let service = service(db);
    let config = service.get(1234).await?;

    assert_eq!(config.prefix, "!");
    assert_eq!(service.stats().await.entries, 1);

    Ok(())
}

/// Tests that a cached entry is served within its TTL.
///
/// Verifies that a write made behind the service's back is not visible while the entry
/// is cached.
///
/// Expected: Ok with the originally cached prefix
#[tokio::test]
async fn serves_cached_value_within_ttl() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    factory::guild_config::GuildConfigFactory::new(db, 1234)
        .prefix("?")
        .build()
        .await?;

    let service = service(db);
    assert_eq!(service.get(1234).await?.prefix, "?");

    GuildConfigRepository::new(db)
        .update(1234, set_prefix("$"))
        .await?;

    assert_eq!(service.get(1234).await?.prefix, "?");

    Ok(())
}

/// Tests that an expired entry is reloaded from the database.
///
/// Expected: Ok with the prefix written after the first read
#[tokio::test]
async fn reloads_after_ttl() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let service = GuildConfigService::new(db.clone(), Duration::from_millis(100), 100);
    assert_eq!(service.get(1234).await?.prefix, "!");

    GuildConfigRepository::new(db)
        .update(1234, set_prefix("$"))
        .await?;

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(service.get(1234).await?.prefix, "$");

    Ok(())
}
