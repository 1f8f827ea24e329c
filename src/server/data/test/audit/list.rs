use super::*;

/// Tests rendering of the event, user and note columns.
///
/// The viewer's own rows show "You"; other actors show their name.
///
/// Expected: newest first with title-cased event and note
#[tokio::test]
async fn renders_viewer_as_you() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = UserFactory::new(db).name("Viewer").build().await?;
    let other = UserFactory::new(db).name("Morgan").build().await?;

    AuditFactory::new(db, "seminars", "1")
        .user_id(Some(viewer.id))
        .created_at(at(0))
        .build()
        .await?;
    AuditFactory::new(db, "participants", "2")
        .user_id(Some(other.id))
        .event(AuditEvent::Deleted)
        .created_at(at(60))
        .build()
        .await?;

    let page = AuditRepository::new(db)
        .list(&ListParams::default(), None, None, Some(viewer.id))
        .await?;

    assert_eq!(page.per_page, AUDIT_PER_PAGE);
    assert_eq!(page.total, 2);

    assert_eq!(page.rows[0]["event"], "Deleted");
    assert_eq!(page.rows[0]["user"], "Morgan");
    assert_eq!(page.rows[0]["note"], "Deleted Participant");

    assert_eq!(page.rows[1]["user"], "You");
    assert_eq!(page.rows[1]["note"], "Created Seminar");
    assert_eq!(page.rows[1]["created_at"], "2025-01-01 00:00");

    Ok(())
}

/// Tests narrowing by target kind and target id.
///
/// Expected: only matching rows returned
#[tokio::test]
async fn filters_by_target_and_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    AuditFactory::new(db, "seminars", "s-1").build().await?;
    AuditFactory::new(db, "seminars", "s-2").build().await?;
    AuditFactory::new(db, "users", "7").build().await?;

    let repo = AuditRepository::new(db);
    let params = ListParams::default();

    let seminars = repo
        .list(&params, Some(AuditTarget::Seminar), None, None)
        .await?;
    assert_eq!(seminars.total, 2);

    let one = repo
        .list(&params, Some(AuditTarget::Seminar), Some("s-2"), None)
        .await?;
    assert_eq!(one.total, 1);

    let all = repo.list(&params, None, None, None).await?;
    assert_eq!(all.total, 3);

    Ok(())
}

/// Tests that search covers the actor's name and the target kind.
///
/// Expected: each term matches one row
#[tokio::test]
async fn searches_user_name_and_target_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = UserFactory::new(db).name("Quinn").build().await?;
    AuditFactory::new(db, "roles", "1")
        .user_id(Some(actor.id))
        .build()
        .await?;
    AuditFactory::new(db, "payments", "2").build().await?;

    let repo = AuditRepository::new(db);

    let by_name = repo
        .list(
            &ListParams {
                search: Some("quinn".to_string()),
                ..Default::default()
            },
            None,
            None,
            None,
        )
        .await?;
    assert_eq!(by_name.total, 1);
    assert_eq!(by_name.rows[0]["note"], "Created Role");

    let by_type = repo
        .list(
            &ListParams {
                search: Some("payment".to_string()),
                ..Default::default()
            },
            None,
            None,
            None,
        )
        .await?;
    assert_eq!(by_type.total, 1);
    assert!(by_type.rows[0]["user"].is_null());

    Ok(())
}
