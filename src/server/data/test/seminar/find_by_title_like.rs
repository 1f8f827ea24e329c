use super::*;

/// Tests the substring title lookup used by participant imports.
///
/// Expected: partial titles match live seminars only
#[tokio::test]
async fn matches_partial_title_of_live_seminar() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = SeminarFactory::new(db)
        .title("Payroll Fundamentals")
        .build()
        .await?;
    SeminarFactory::new(db)
        .title("Archived Payroll")
        .deleted()
        .build()
        .await?;

    let repo = SeminarRepository::new(db);

    let found = repo.find_by_title_like("Fundamentals").await?;
    assert_eq!(found.map(|s| s.id), Some(seminar.id));

    let missing = repo.find_by_title_like("Archived").await?;
    assert!(missing.is_none());

    Ok(())
}
