use super::*;

/// Tests creating a seminar with metadata.
///
/// Expected: inactive by default, metadata stored as a JSON object
#[tokio::test]
async fn creates_inactive_seminar_with_metadata() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let params = SeminarParams {
        title: "Bookkeeping 101".to_string(),
        description: None,
        schedule: at(3600),
        is_active: None,
        additional_info: [("room".to_string(), "B2".to_string())]
            .into_iter()
            .collect(),
    };

    let seminar = SeminarRepository::new(db)
        .create(params, Some(owner.id))
        .await?;

    assert!(!seminar.is_active);
    assert_eq!(seminar.user_id, Some(owner.id));
    assert_eq!(seminar.schedule, at(3600));
    assert_eq!(
        seminar.additional_info,
        Some(serde_json::json!({ "room": "B2" }))
    );

    Ok(())
}

/// Tests that update keeps the stored active flag when none is given.
///
/// Expected: title changed, is_active still true
#[tokio::test]
async fn update_keeps_flag_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = SeminarFactory::new(db).is_active(true).build().await?;

    let updated = SeminarRepository::new(db)
        .update(
            seminar,
            SeminarParams {
                title: "Renamed".to_string(),
                description: Some("Now with slides".to_string()),
                schedule: at(0),
                is_active: None,
                additional_info: Default::default(),
            },
        )
        .await?;

    assert_eq!(updated.title, "Renamed");
    assert!(updated.is_active);
    assert_eq!(updated.additional_info, None);

    Ok(())
}
