use uuid::Uuid;

use super::*;
use crate::server::service::seminar::SeminarService;

/// Tests bulk destroy with an empty id list.
///
/// Expected: Err(BadRequest("No IDs provided")) and nothing deleted
#[tokio::test]
async fn bulk_destroy_rejects_empty_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = factory::create_seminar(db, None).await?;

    let result = SeminarService::new(db).bulk_destroy(&[], None).await;

    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "No IDs provided"));
    let stored = entity::prelude::Seminar::find_by_id(seminar.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.deleted_at.is_none());

    Ok(())
}

/// Tests bulk destroy with named and unknown ids.
///
/// Expected: only the named seminars are soft-deleted, one audit row each
#[tokio::test]
async fn bulk_destroy_deletes_only_named() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_seminar(db, None).await?;
    let second = factory::create_seminar(db, None).await?;
    let kept = factory::create_seminar(db, None).await?;

    let deleted = SeminarService::new(db)
        .bulk_destroy(&[first.id, second.id, Uuid::new_v4()], None)
        .await
        .unwrap();

    assert_eq!(deleted, 2);

    for id in [first.id, second.id] {
        let stored = entity::prelude::Seminar::find_by_id(id).one(db).await?.unwrap();
        assert!(stored.deleted_at.is_some());
    }
    let kept = entity::prelude::Seminar::find_by_id(kept.id).one(db).await?.unwrap();
    assert!(kept.deleted_at.is_none());

    assert_eq!(entity::prelude::Audit::find().count(db).await?, 2);

    Ok(())
}

/// Tests that a soft-deleted seminar is no longer found.
///
/// Expected: Err(NotFound) on show after destroy
#[tokio::test]
async fn destroyed_seminar_is_not_found() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = factory::create_seminar(db, None).await?;
    let service = SeminarService::new(db);

    service.destroy(seminar.id, None).await.unwrap();

    assert!(matches!(
        service.show(seminar.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests the status toggle and its audit diff.
///
/// Expected: flag flipped; audit stores only is_active
#[tokio::test]
async fn update_status_audits_change() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let seminar = factory::create_seminar(db, Some(user.id)).await?;

    let updated = SeminarService::new(db)
        .update_status(seminar.id, !seminar.is_active, Some(user.id))
        .await
        .unwrap();

    assert_eq!(updated.is_active, !seminar.is_active);

    let audit = entity::prelude::Audit::find().one(db).await?.unwrap();
    assert_eq!(audit.user_id, Some(user.id));
    let new_values = audit.new_values.unwrap();
    assert_eq!(new_values["is_active"], serde_json::json!(!seminar.is_active));
    assert!(new_values.get("title").is_none());

    Ok(())
}
