use super::*;

/// Tests the sweep query for stale pending jobs.
///
/// Expected: only pending records older than the cutoff
#[tokio::test]
async fn returns_old_pending_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = DownloadExportFactory::new(db).created_at(at(0)).build().await?;
    DownloadExportFactory::new(db)
        .status(JobStatus::Failed)
        .created_at(at(0))
        .build()
        .await?;
    DownloadExportFactory::new(db).created_at(at(500)).build().await?;

    let found = DownloadExportRepository::new(db)
        .find_stale_pending(at(100))
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stale.id);

    Ok(())
}
