use std::time::Duration;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::download_export::DownloadExportRepository,
    error::AppError,
    jobs::{JobContext, JobQueue, JobTask},
};

/// Starts the stale job sweep.
///
/// Runs every minute and re-dispatches job records that are still `pending`
/// after `stale_after` and are not held by a worker. This recovers work that
/// was queued in memory when the process stopped.
///
/// # Arguments
/// - `ctx`: Resources shared with the job workers
/// - `queue`: Queue the recovered jobs are dispatched to
/// - `stale_after`: Age after which a pending record counts as lost
pub async fn start_scheduler(
    ctx: JobContext,
    queue: JobQueue,
    stale_after: Duration,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let ctx = ctx.clone();
        let queue = queue.clone();

        Box::pin(async move {
            if let Err(e) = sweep_stale_jobs(&ctx, &queue, stale_after).await {
                tracing::error!("Error sweeping stale jobs: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Stale job sweep scheduler started");

    Ok(())
}

/// Dispatches every stale pending record once.
///
/// Records whose payload cannot be decoded are marked `failed`.
///
/// # Returns
/// - `Ok(usize)` - Number of records dispatched
/// - `Err(AppError)` - Database error while loading or updating records
pub async fn sweep_stale_jobs(
    ctx: &JobContext,
    queue: &JobQueue,
    stale_after: Duration,
) -> Result<usize, AppError> {
    let repo = DownloadExportRepository::new(&ctx.db);
    let cutoff = Utc::now()
        - chrono::Duration::from_std(stale_after)
            .map_err(|e| AppError::InternalError(e.to_string()))?;

    let mut dispatched = 0;

    for record in repo.find_stale_pending(cutoff).await? {
        if queue.is_in_flight(record.id).await {
            continue;
        }

        let task = match JobTask::from_payload(&record.payload) {
            Ok(task) => task,
            Err(err) => {
                tracing::error!(job_id = record.id, "Undecodable job payload: {}", err);
                repo.mark_failed(record.id, &err.to_string(), Utc::now())
                    .await?;
                continue;
            }
        };

        tracing::info!(job_id = record.id, task = task.name(), "Re-dispatching stale job");
        queue.dispatch(record.id, task).await?;
        dispatched += 1;
    }

    Ok(dispatched)
}
