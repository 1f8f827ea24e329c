use std::time::Duration;

use super::*;

fn quick_config(max_attempts: u32, retry_delay: Duration) -> JobConfig {
    JobConfig {
        workers: 1,
        max_attempts,
        retry_delay,
        ..JobConfig::default()
    }
}

/// Polls the record until `done` holds or about two seconds pass.
async fn wait_for_job(
    db: &DatabaseConnection,
    job_id: i32,
    done: impl Fn(&entity::download_export::Model) -> bool,
) -> Result<entity::download_export::Model, DbErr> {
    let mut job = find_job(db, job_id).await?;
    for _ in 0..100 {
        if done(&job) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        job = find_job(db, job_id).await?;
    }
    Ok(job)
}

async fn wait_until_released(queue: &JobQueue, job_id: i32) {
    for _ in 0..100 {
        if !queue.is_in_flight(job_id).await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Tests that a missing job record fails fatally without writing anything.
///
/// Expected: Err(RecordNotFound), not retryable, other records untouched
#[tokio::test]
async fn missing_record_is_fatal_and_untouched() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let ctx = context(db, root);

    let other = DownloadExportFactory::new(db).build().await?;
    let task = JobTask::ExportSeminars { headers: Vec::new() };

    let err = handle(&ctx, other.id + 100, &task).await.unwrap_err();

    assert!(matches!(err, JobError::RecordNotFound(_)));
    assert!(!err.is_retryable());
    assert_eq!(entity::prelude::DownloadExport::find().count(db).await?, 1);

    let other = find_job(db, other.id).await?;
    assert_eq!(other.status, JobStatus::Pending);
    assert!(other.finished_at.is_none());

    Ok(())
}

/// Tests that a failing routine marks the record failed and re-raises.
///
/// The import's source file does not exist on disk.
///
/// Expected: Err, status failed with error text and finished_at
#[tokio::test]
async fn routine_error_marks_failed() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let ctx = context(db, root);

    let task = JobTask::ImportSeminars {
        path: "seminars/imported/missing.csv".to_string(),
        user_id: None,
    };
    let job_id = job_record(db, &task).await?;

    let err = handle(&ctx, job_id, &task).await.unwrap_err();
    assert!(err.is_retryable());

    let job = find_job(db, job_id).await?;
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.is_some());
    assert!(job.finished_at.is_some());

    Ok(())
}

/// Tests dispatch through the worker pool.
///
/// Expected: the record reaches completed and leaves the in-flight set
#[tokio::test]
async fn queue_runs_dispatched_job() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let queue = JobQueue::start(context(db, root), JobConfig::default());

    let task = JobTask::ExportSeminars {
        headers: vec![ExportHeader {
            value: "title".to_string(),
            label: "Title".to_string(),
        }],
    };
    let job_id = job_record(db, &task).await?;

    queue.dispatch(job_id, task).await.unwrap();

    let mut status = JobStatus::Pending;
    for _ in 0..100 {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        status = find_job(db, job_id).await?.status;
        if status != JobStatus::Pending {
            break;
        }
    }

    assert_eq!(status, JobStatus::Completed);
    for _ in 0..10 {
        if !queue.is_in_flight(job_id).await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(!queue.is_in_flight(job_id).await);

    Ok(())
}

/// Tests that a retryable failure is re-run after the retry delay.
///
/// The import file is missing on the first attempt and written before the retry.
///
/// Expected: failed after attempt 1, then completed with the error cleared
#[tokio::test]
async fn failed_attempt_is_retried() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let ctx = context(db, root);
    let storage = ctx.storage.clone();
    let queue = JobQueue::start(ctx, quick_config(2, Duration::from_millis(400)));

    let path = "seminars/imported/late.csv";
    let task = JobTask::ImportSeminars {
        path: path.to_string(),
        user_id: None,
    };
    let job_id = job_record(db, &task).await?;

    queue.dispatch(job_id, task).await.unwrap();

    let job = wait_for_job(db, job_id, |job| job.status != JobStatus::Pending).await?;
    assert_eq!(job.status, JobStatus::Failed);
    assert!(queue.is_in_flight(job_id).await);

    storage
        .put(
            Disk::Private,
            path,
            b"Seminar Import\ntitle,description,schedule,status\nPayroll,,2025-02-01,active\n",
        )
        .await
        .unwrap();

    let job = wait_for_job(db, job_id, |job| job.status == JobStatus::Completed).await?;
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.error.is_none());

    wait_until_released(&queue, job_id).await;
    assert!(!queue.is_in_flight(job_id).await);
    assert_eq!(entity::prelude::Seminar::find().count(db).await?, 1);

    Ok(())
}

/// Tests that retries stop once the attempt budget is spent.
///
/// Expected: record stays failed with its error and leaves the in-flight set
#[tokio::test]
async fn retries_stop_after_attempt_budget() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let queue = JobQueue::start(context(db, root), quick_config(2, Duration::from_millis(50)));

    let task = JobTask::ImportSeminars {
        path: "seminars/imported/never.csv".to_string(),
        user_id: None,
    };
    let job_id = job_record(db, &task).await?;

    queue.dispatch(job_id, task).await.unwrap();
    wait_until_released(&queue, job_id).await;

    assert!(!queue.is_in_flight(job_id).await);
    let job = find_job(db, job_id).await?;
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.is_some());
    assert!(job.finished_at.is_some());

    Ok(())
}

/// Tests that a schedule cell far outside the date range does not stop the worker.
///
/// Expected: the import completes with the row skipped and a later export still runs
#[tokio::test]
async fn out_of_range_serial_keeps_worker_alive() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let ctx = context(db, root);
    let storage = ctx.storage.clone();
    let queue = JobQueue::start(ctx, quick_config(1, Duration::from_millis(50)));

    let path = "seminars/imported/huge.csv";
    storage
        .put(
            Disk::Private,
            path,
            b"Seminar Import\ntitle,description,schedule,status\nX,,1e18,active\n",
        )
        .await
        .unwrap();
    let import = JobTask::ImportSeminars {
        path: path.to_string(),
        user_id: None,
    };
    let import_id = job_record(db, &import).await?;
    queue.dispatch(import_id, import).await.unwrap();

    let job = wait_for_job(db, import_id, |job| job.status != JobStatus::Pending).await?;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(entity::prelude::Seminar::find().count(db).await?, 0);

    let export = JobTask::ExportSeminars {
        headers: vec![ExportHeader {
            value: "title".to_string(),
            label: "Title".to_string(),
        }],
    };
    let export_id = job_record(db, &export).await?;
    queue.dispatch(export_id, export).await.unwrap();

    let job = wait_for_job(db, export_id, |job| job.status != JobStatus::Pending).await?;
    assert_eq!(job.status, JobStatus::Completed);

    Ok(())
}
