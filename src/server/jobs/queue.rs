//! Job worker pool.
//!
//! `JobQueue` feeds a tokio channel shared by a fixed number of workers. Each
//! delivery runs [`handle`]; a retryable failure is re-enqueued after the retry
//! delay until the attempt budget is spent. Ids of queued or running jobs are
//! tracked so the stale-job sweep does not queue the same record twice. Each
//! attempt runs in its own task, so a panicking routine fails its record and
//! leaves the worker running.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinError,
};

use crate::server::{
    config::JobConfig,
    data::download_export::DownloadExportRepository,
    error::job::JobError,
    jobs::{task::JobTask, JobContext},
};

struct QueuedJob {
    job_id: i32,
    task: JobTask,
    attempt: u32,
}

#[derive(Clone)]
pub struct JobQueue {
    sender: mpsc::UnboundedSender<QueuedJob>,
    in_flight: Arc<Mutex<HashSet<i32>>>,
}

impl JobQueue {
    /// Spawns the workers and returns a handle for dispatching jobs.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(ctx: JobContext, config: JobConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let queue = Self {
            sender,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        };

        for worker in 0..config.workers.max(1) {
            tokio::spawn(run_worker(
                worker,
                queue.clone(),
                receiver.clone(),
                ctx.clone(),
                config.clone(),
            ));
        }

        tracing::info!(workers = config.workers.max(1), "Job queue started");

        queue
    }

    /// Enqueues the first attempt of `task` for the job record `job_id`.
    pub async fn dispatch(&self, job_id: i32, task: JobTask) -> Result<(), JobError> {
        tracing::debug!(job_id, task = task.name(), "Dispatching job");

        self.enqueue(QueuedJob {
            job_id,
            task,
            attempt: 1,
        })
        .await
    }

    /// Whether `job_id` is queued, running or waiting for a retry.
    pub async fn is_in_flight(&self, job_id: i32) -> bool {
        self.in_flight.lock().await.contains(&job_id)
    }

    async fn enqueue(&self, job: QueuedJob) -> Result<(), JobError> {
        let job_id = job.job_id;
        self.in_flight.lock().await.insert(job_id);

        if self.sender.send(job).is_err() {
            self.release(job_id).await;
            return Err(JobError::QueueClosed);
        }

        Ok(())
    }

    async fn release(&self, job_id: i32) {
        self.in_flight.lock().await.remove(&job_id);
    }
}

async fn run_worker(
    worker: usize,
    queue: JobQueue,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<QueuedJob>>>,
    ctx: JobContext,
    config: JobConfig,
) {
    loop {
        let next = receiver.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };

        tracing::debug!(worker, job_id = job.job_id, attempt = job.attempt, "Running job");

        match run_attempt(&ctx, &job).await {
            Ok(_) => queue.release(job.job_id).await,
            Err(err) if err.is_retryable() && job.attempt < config.max_attempts => {
                tracing::warn!(
                    job_id = job.job_id,
                    attempt = job.attempt,
                    "Job failed, retrying in {:?}: {}",
                    config.retry_delay,
                    err
                );

                let queue = queue.clone();
                let delay = config.retry_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let job_id = job.job_id;
                    let retry = QueuedJob {
                        attempt: job.attempt + 1,
                        ..job
                    };
                    if let Err(e) = queue.enqueue(retry).await {
                        tracing::error!(job_id, "Failed to re-enqueue job: {}", e);
                    }
                });
            }
            Err(err) => {
                tracing::error!(
                    job_id = job.job_id,
                    attempt = job.attempt,
                    "Job failed permanently: {}",
                    err
                );
                queue.release(job.job_id).await;
            }
        }
    }

    tracing::debug!(worker, "Job worker stopped");
}

/// Runs [`handle`] on its own task and turns a panic into a failed record.
async fn run_attempt(ctx: &JobContext, job: &QueuedJob) -> Result<Option<String>, JobError> {
    let job_id = job.job_id;
    let attempt = {
        let ctx = ctx.clone();
        let task = job.task.clone();
        tokio::spawn(async move { handle(&ctx, job_id, &task).await })
    };

    match attempt.await {
        Ok(result) => result,
        Err(join_err) => {
            let err = JobError::Panicked(panic_message(join_err));
            tracing::error!(job_id, "Job routine aborted: {}", err);

            let repo = DownloadExportRepository::new(&ctx.db);
            if let Err(db_err) = repo.mark_failed(job_id, &err.to_string(), Utc::now()).await {
                tracing::error!(job_id, "Failed to mark job as failed: {}", db_err);
            }

            Err(err)
        }
    }
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs one attempt of a job and finalises its record.
///
/// A missing record is fatal: nothing is written and `RecordNotFound` is returned.
/// Otherwise the record is marked `completed` (storing the returned path, if any)
/// or `failed` with the error text, and the error is returned for the retry
/// policy to inspect. Records already `completed` are never overwritten.
///
/// # Returns
/// - `Ok(Option<String>)` - Path produced by the task
/// - `Err(JobError)` - Missing record or task failure
pub async fn handle(
    ctx: &JobContext,
    job_id: i32,
    task: &JobTask,
) -> Result<Option<String>, JobError> {
    let repo = DownloadExportRepository::new(&ctx.db);

    let outcome = match repo.find_by_id(job_id).await {
        Ok(Some(_)) => task.run(ctx).await,
        Ok(None) => {
            tracing::error!(job_id, "Job record not found");
            return Err(JobError::RecordNotFound(job_id));
        }
        Err(err) => Err(err.into()),
    };

    match outcome {
        Ok(path) => {
            if !repo.mark_completed(job_id, path.clone(), Utc::now()).await? {
                tracing::warn!(job_id, "Job record already completed; result not stored");
            } else {
                tracing::info!(job_id, task = task.name(), "Job completed");
            }
            Ok(path)
        }
        Err(err) => {
            match repo.mark_failed(job_id, &err.to_string(), Utc::now()).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(job_id, "Job record already completed; failure not stored")
                }
                Err(db_err) => {
                    tracing::error!(job_id, "Failed to mark job as failed: {}", db_err)
                }
            }
            Err(err)
        }
    }
}
