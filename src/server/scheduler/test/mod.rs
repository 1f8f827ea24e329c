use std::time::Duration;

use entity::sea_orm_active_enums::JobStatus;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory::download_export::DownloadExportFactory};

use crate::server::{
    config::JobConfig,
    jobs::{ExportHeader, JobContext, JobQueue, JobTask},
    scheduler::job_sweep::sweep_stale_jobs,
    storage::Storage,
};

/// Tests the sweep over a mix of stale, fresh, finished and undecodable records.
///
/// Expected: only the stale decodable record is dispatched; the undecodable one is failed
#[tokio::test]
async fn sweeps_stale_pending_records() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let ctx = JobContext {
        db: db.clone(),
        storage: Storage::new(root),
        app_url: "http://localhost:8080".to_string(),
    };
    let queue = JobQueue::start(ctx.clone(), JobConfig::default());

    let old = chrono::Utc::now() - chrono::Duration::hours(1);
    let task = JobTask::ExportSeminars {
        headers: vec![ExportHeader {
            value: "title".to_string(),
            label: "Title".to_string(),
        }],
    };

    DownloadExportFactory::new(db)
        .payload(task.to_payload().unwrap())
        .created_at(old)
        .build()
        .await?;
    DownloadExportFactory::new(db)
        .payload(task.to_payload().unwrap())
        .build()
        .await?;
    DownloadExportFactory::new(db)
        .status(JobStatus::Completed)
        .payload(task.to_payload().unwrap())
        .created_at(old)
        .build()
        .await?;
    let broken = DownloadExportFactory::new(db)
        .payload(serde_json::json!({ "task": "launch_rockets" }))
        .created_at(old)
        .build()
        .await?;

    let dispatched = sweep_stale_jobs(&ctx, &queue, Duration::from_secs(600))
        .await
        .unwrap();

    assert_eq!(dispatched, 1);

    let broken = entity::prelude::DownloadExport::find_by_id(broken.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(broken.status, JobStatus::Failed);
    assert!(broken.error.is_some());

    Ok(())
}
