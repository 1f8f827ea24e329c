use super::*;

/// Tests completing a pending job.
///
/// Expected: status completed, path and finished_at stored
#[tokio::test]
async fn completes_pending_job() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DownloadExportRepository::new(db);
    let job = repo
        .create(NewJobRecord {
            name: "Seminar Download".to_string(),
            kind: JobKind::Export,
            path: None,
            user_id: None,
            payload: serde_json::json!({}),
        })
        .await?;
    assert_eq!(job.status, JobStatus::Pending);

    let finished = Utc::now();
    let updated = repo
        .mark_completed(job.id, Some("seminars/exported/a.xlsx".to_string()), finished)
        .await?;
    assert!(updated);

    let job = repo.find_by_id(job.id).await?.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.path.as_deref(), Some("seminars/exported/a.xlsx"));
    assert!(job.finished_at.is_some());

    Ok(())
}

/// Tests that a completed job is never overwritten.
///
/// Expected: a later failure write affects no rows and the record stays completed
#[tokio::test]
async fn completed_job_is_final() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let job = DownloadExportFactory::new(db)
        .status(JobStatus::Completed)
        .path("payments/exported/p.xlsx")
        .build()
        .await?;

    let repo = DownloadExportRepository::new(db);
    let updated = repo.mark_failed(job.id, "late retry", Utc::now()).await?;
    assert!(!updated);

    let job = repo.find_by_id(job.id).await?.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.error.is_none());

    Ok(())
}

/// Tests that a completed import keeps the path recorded at creation.
///
/// Expected: path unchanged when the task returns none
#[tokio::test]
async fn keeps_existing_path_without_artifact() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let job = DownloadExportFactory::new(db)
        .kind(JobKind::Import)
        .path("seminars/imported/x.xlsx")
        .build()
        .await?;

    let repo = DownloadExportRepository::new(db);
    assert!(repo.mark_completed(job.id, None, Utc::now()).await?);

    let job = repo.find_by_id(job.id).await?.unwrap();
    assert_eq!(job.path.as_deref(), Some("seminars/imported/x.xlsx"));

    Ok(())
}
