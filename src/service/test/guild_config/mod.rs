use std::time::Duration;

use crate::{
    data::guild_config::GuildConfigRepository, error::AppError,
    model::guild_config::UpdateGuildConfigParam, service::guild_config::GuildConfigService,
};
use test_utils::{builder::TestBuilder, factory};

mod get;
mod invalidate;
mod update;

fn service(db: &sea_orm::DatabaseConnection) -> GuildConfigService {
    GuildConfigService::new(db.clone(), Duration::from_secs(300), 100)
}

fn set_prefix(prefix: &str) -> UpdateGuildConfigParam {
    UpdateGuildConfigParam {
        prefix: Some(prefix.to_string()),
        ..Default::default()
    }
}
