use super::*;

/// Tests that updating through the service invalidates the cached entry.
///
/// Expected: Ok with the new log channel on the next read
#[tokio::test]
async fn next_read_sees_update() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let service = service(db);
    assert!(service.get(1234).await?.log_channel_id.is_none());

    let updated = service
        .update(
            1234,
            UpdateGuildConfigParam {
                log_channel_id: Some(Some(555)),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.log_channel_id, Some(555));

    assert_eq!(service.get(1234).await?.log_channel_id, Some(555));

    Ok(())
}
