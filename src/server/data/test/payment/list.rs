use super::*;

/// Tests participant columns and the public URL rendering of the receipt.
///
/// Expected: participant name/email rendered, file path expanded under /storage
#[tokio::test]
async fn renders_participant_and_file_url() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, participant, _) = create_payment_with_dependencies(db).await?;
    PaymentFactory::new(db, participant.id)
        .file_path("uploads/1700000000_receipt.pdf")
        .build()
        .await?;

    let page = PaymentRepository::new(db)
        .list(&ListParams::default(), "https://office.example")
        .await?;

    assert_eq!(page.total, 2);
    let with_file = page
        .rows
        .iter()
        .find(|row| !row["file_path"].is_null())
        .unwrap();
    assert_eq!(
        with_file["file_path"],
        "https://office.example/storage/uploads/1700000000_receipt.pdf"
    );
    assert_eq!(with_file["participant_name"], participant.name.as_str());
    assert_eq!(with_file["participant_email"], participant.email.as_str());

    Ok(())
}

/// Tests searching payments by participant email.
///
/// Expected: only that participant's payment matches
#[tokio::test]
async fn searches_participant_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, first, _) = create_payment_with_dependencies(db).await?;
    create_payment_with_dependencies(db).await?;

    let page = PaymentRepository::new(db)
        .list(
            &ListParams {
                search: Some(first.email.to_uppercase()),
                ..Default::default()
            },
            "http://localhost",
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0]["participant_email"], first.email.as_str());

    Ok(())
}
