use super::*;

/// Tests the download list's link and type columns.
///
/// Expected: link only when a path exists; type title-cased
#[tokio::test]
async fn renders_link_and_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let done = DownloadExportFactory::new(db)
        .status(JobStatus::Completed)
        .path("seminars/exported/s.xlsx")
        .created_at(at(10))
        .build()
        .await?;
    DownloadExportFactory::new(db)
        .kind(JobKind::Import)
        .created_at(at(0))
        .build()
        .await?;

    let page = DownloadExportRepository::new(db)
        .list(&ListParams::default(), "http://localhost:8080/")
        .await?;

    assert_eq!(page.total, 2);
    assert_eq!(
        page.rows[0]["link"],
        format!(
            "http://localhost:8080/api/dashboard/downloads/{}/download",
            done.id
        )
    );
    assert_eq!(page.rows[0]["type"], "Export");
    assert_eq!(page.rows[0]["status"], "completed");
    assert!(page.rows[1]["link"].is_null());
    assert_eq!(page.rows[1]["type"], "Import");
    assert!(page.rows[1]["finished_at"].is_null());

    Ok(())
}
