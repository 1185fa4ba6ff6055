//! Background driver for temporary role expiry.
//!
//! In sweep mode a cron job sweeps expired grants on a fixed schedule (every minute by
//! default), after one immediate sweep at startup. In timer mode every stored grant is armed
//! at startup and new grants are armed on intake.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::{Config, SchedulerMode},
    error::AppError,
    scheduler::expiry_timers::ExpiryTimers,
    service::{
        discord::directory::GuildDirectory,
        temp_role::{ExpiryMode, TempRoleService},
    },
    util::clock::Clock,
};

/// Running temporary role machinery: the service plus whatever drives its removals.
pub struct TempRoleRuntime {
    service: TempRoleService,
    sweeper: Mutex<Option<JobScheduler>>,
}

impl TempRoleRuntime {
    /// Builds the service, recovers pending grants and starts the configured driver.
    ///
    /// Recovery failures are logged rather than returned: in sweep mode the next tick
    /// retries, and in timer mode the grants stay in the database for the next start.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `directory` - Discord lookups used when revoking
    /// - `clock` - Time source
    /// - `config` - Scheduler mode and sweep schedule
    ///
    /// # Returns
    /// - `Ok(TempRoleRuntime)` - Running runtime
    /// - `Err(AppError::SchedulerErr)` - Sweep job could not be created or started
    pub async fn start(
        db: DatabaseConnection,
        directory: Arc<dyn GuildDirectory>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Result<Self, AppError> {
        let mode = match config.temp_role_scheduler {
            SchedulerMode::Sweep => ExpiryMode::Sweep,
            SchedulerMode::Timer => ExpiryMode::Timers(Arc::new(ExpiryTimers::new())),
        };
        let service = TempRoleService::new(db, directory, clock, mode);

        if let Err(e) = service.recover().await {
            tracing::error!("Failed to recover temporary roles: {}", e);
        }

        let sweeper = match config.temp_role_scheduler {
            SchedulerMode::Sweep => {
                Some(start_sweeper(service.clone(), &config.temp_role_sweep_schedule).await?)
            }
            SchedulerMode::Timer => None,
        };

        Ok(Self {
            service,
            sweeper: Mutex::new(sweeper),
        })
    }

    pub fn service(&self) -> &TempRoleService {
        &self.service
    }

    /// Stops the sweep job and cancels pending timers.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.service.shutdown();

        if let Some(mut sweeper) = self.sweeper.lock().await.take() {
            sweeper.shutdown().await?;
            tracing::info!("Temporary role sweeper stopped");
        }

        Ok(())
    }
}

/// Starts the periodic sweep job.
///
/// # Arguments
/// - `service`: Service whose `sweep` the job calls
/// - `schedule`: Cron expression with a seconds field
async fn start_sweeper(
    service: TempRoleService,
    schedule: &str,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let service = service.clone();

        Box::pin(async move {
            if let Err(e) = service.sweep().await {
                tracing::error!("Error sweeping expired temporary roles: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Temporary role sweeper started ({})", schedule);

    Ok(scheduler)
}
