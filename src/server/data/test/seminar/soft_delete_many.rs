use super::*;

/// Tests that bulk soft-delete touches only the named live seminars.
///
/// Expected: two rows affected, the third seminar still listed
#[tokio::test]
async fn deletes_only_named_seminars() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_seminar(db, None).await?;
    let b = factory::create_seminar(db, None).await?;
    let keep = factory::create_seminar(db, None).await?;

    let repo = SeminarRepository::new(db);
    let affected = repo.soft_delete_many(&[a.id, b.id]).await?;

    assert_eq!(affected, 2);
    assert!(repo.find_by_id(a.id).await?.is_none());
    assert!(repo.find_by_id(b.id).await?.is_none());
    assert!(repo.find_by_id(keep.id).await?.is_some());

    let again = repo.soft_delete_many(&[a.id]).await?;
    assert_eq!(again, 0);

    Ok(())
}

/// Tests the export query's participant counts.
///
/// Expected: soft-deleted participants are not counted
#[tokio::test]
async fn export_counts_live_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = factory::create_seminar(db, None).await?;
    factory::create_participant(db, seminar.id).await?;
    let gone = factory::create_participant(db, seminar.id).await?;
    crate::server::data::participant::ParticipantRepository::new(db)
        .soft_delete(gone)
        .await?;

    let rows = SeminarRepository::new(db).all_with_owner_and_counts().await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].2, 1);

    Ok(())
}
