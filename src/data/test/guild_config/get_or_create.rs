use super::*;

/// Tests first access creates a default row.
///
/// Expected: Ok with default prefix and no channels, and one row stored
#[tokio::test]
async fn creates_default_config() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = GuildConfigRepository::new(db);
    let config = repo.get_or_create(1234).await?;

    assert_eq!(config.guild_id, 1234);
    assert_eq!(config.prefix, DEFAULT_PREFIX);
    assert!(config.log_channel_id.is_none());
    assert!(config.welcome_channel_id.is_none());

    let count = entity::prelude::GuildConfig::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that an existing row is returned unchanged.
///
/// Expected: Ok with the stored prefix and log channel
#[tokio::test]
async fn returns_existing_config() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    factory::guild_config::GuildConfigFactory::new(db, 1234)
        .prefix("?")
        .log_channel_id(Some(555))
        .build()
        .await?;

    let repo = GuildConfigRepository::new(db);
    let config = repo.get_or_create(1234).await?;

    assert_eq!(config.prefix, "?");
    assert_eq!(config.log_channel_id, Some(555));

    Ok(())
}

/// Tests that repeated access doesn't create duplicate rows.
///
/// Expected: Ok with one row after two calls
#[tokio::test]
async fn repeated_access_keeps_single_row() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = GuildConfigRepository::new(db);
    let first = repo.get_or_create(1234).await?;
    let second = repo.get_or_create(1234).await?;

    assert_eq!(first.created_at, second.created_at);

    let count = entity::prelude::GuildConfig::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
