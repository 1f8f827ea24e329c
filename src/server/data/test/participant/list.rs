use super::*;

/// Tests that the seminar column renders and searches the seminar title.
///
/// Expected: searching by seminar title returns its participants with the title rendered
#[tokio::test]
async fn searches_and_renders_seminar_title() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let audit = SeminarFactory::new(db).title("Internal Audit").build().await?;
    let other = SeminarFactory::new(db).title("Cash Flow").build().await?;
    ParticipantFactory::new(db, audit.id).name("Ana").build().await?;
    ParticipantFactory::new(db, other.id).name("Ben").build().await?;

    let page = ParticipantRepository::new(db)
        .list(&ListParams {
            search: Some("internal".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0]["name"], "Ana");
    assert_eq!(page.rows[0]["seminar"], "Internal Audit");

    Ok(())
}

/// Tests the page size precedence of `limit` over `per_page`.
///
/// Expected: `limit` wins
#[tokio::test]
async fn limit_overrides_per_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = factory::create_seminar(db, None).await?;
    for _ in 0..4 {
        factory::create_participant(db, seminar.id).await?;
    }

    let page = ParticipantRepository::new(db)
        .list(&ListParams {
            limit: Some(3),
            per_page: Some(1),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.per_page, 3);
    assert_eq!(page.rows.len(), 3);
    assert_eq!(page.last_page, 2);

    Ok(())
}
