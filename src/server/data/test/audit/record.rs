use super::*;

/// Tests recording an audit row for a target.
///
/// Expected: target slug stored as auditable_type, values kept
#[tokio::test]
async fn stores_target_slug_and_values() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).build().await?;

    let row = AuditRepository::new(db)
        .record(AuditEntry {
            user_id: Some(user.id),
            event: AuditEvent::Updated,
            target: AuditTarget::Payment,
            auditable_id: "abc".to_string(),
            old_values: Some(serde_json::json!({ "is_verified": false })),
            new_values: Some(serde_json::json!({ "is_verified": true })),
        })
        .await?;

    assert_eq!(row.auditable_type, "payments");
    assert_eq!(row.event, AuditEvent::Updated);
    assert_eq!(row.new_values, Some(serde_json::json!({ "is_verified": true })));

    Ok(())
}
