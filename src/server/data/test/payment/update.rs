use super::*;

/// Tests that update without a new file keeps the stored path.
///
/// Expected: file path unchanged, verification flag applied
#[tokio::test]
async fn keeps_file_when_none_given() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, participant, _) = create_payment_with_dependencies(db).await?;
    let payment = PaymentFactory::new(db, participant.id)
        .file_path("uploads/1_old.pdf")
        .build()
        .await?;

    let updated = PaymentRepository::new(db)
        .update(
            payment,
            PaymentRecord {
                participant_id: participant.id,
                file_path: None,
                uploaded_at: None,
                is_verified: Some(true),
                metadata: None,
            },
        )
        .await?;

    assert_eq!(updated.file_path.as_deref(), Some("uploads/1_old.pdf"));
    assert!(updated.is_verified);

    Ok(())
}
