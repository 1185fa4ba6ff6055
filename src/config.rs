use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_SWEEP_SCHEDULE: &str = "0 * * * * *";
const DEFAULT_GUILD_CONFIG_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_GUILD_CONFIG_CACHE_CAPACITY: u64 = 10_000;

/// How pending temporary role removals are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerMode {
    /// A periodic job removes every grant whose expiry has passed.
    Sweep,
    /// One deferred task per grant, fired at its exact expiry.
    Timer,
}

impl SchedulerMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sweep" => Some(Self::Sweep),
            "timer" => Some(Self::Timer),
            _ => None,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub temp_role_scheduler: SchedulerMode,
    /// Cron expression (with seconds) for the sweep job.
    pub temp_role_sweep_schedule: String,

    pub guild_config_cache_ttl: Duration,
    pub guild_config_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let temp_role_scheduler = match lookup("TEMP_ROLE_SCHEDULER") {
            None => SchedulerMode::Sweep,
            Some(value) => {
                SchedulerMode::parse(&value).ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "TEMP_ROLE_SCHEDULER".to_string(),
                    value: value.clone(),
                    reason: "expected 'sweep' or 'timer'".to_string(),
                })?
            }
        };

        let cache_ttl_secs = parse_u64(
            &lookup,
            "GUILD_CONFIG_CACHE_TTL_SECS",
            DEFAULT_GUILD_CONFIG_CACHE_TTL_SECS,
        )?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            temp_role_scheduler,
            temp_role_sweep_schedule: lookup("TEMP_ROLE_SWEEP_CRON")
                .unwrap_or_else(|| DEFAULT_SWEEP_SCHEDULE.to_string()),
            guild_config_cache_ttl: Duration::from_secs(cache_ttl_secs),
            guild_config_cache_capacity: parse_u64(
                &lookup,
                "GUILD_CONFIG_CACHE_CAPACITY",
                DEFAULT_GUILD_CONFIG_CACHE_CAPACITY,
            )?,
        })
    }
}

fn parse_u64<F>(lookup: &F, name: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
                reason: e.to_string(),
            }),
    }
}
