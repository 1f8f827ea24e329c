use super::*;

/// Tests the exact email lookup used by payment imports.
///
/// Expected: exact match found, partial match and deleted participants ignored
#[tokio::test]
async fn matches_exact_email_of_live_participant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seminar = factory::create_seminar(db, None).await?;
    let participant = ParticipantFactory::new(db, seminar.id)
        .email("sam@example.com")
        .build()
        .await?;
    let gone = ParticipantFactory::new(db, seminar.id)
        .email("gone@example.com")
        .build()
        .await?;

    let repo = ParticipantRepository::new(db);
    repo.soft_delete(gone).await?;

    let found = repo.find_by_email("sam@example.com").await?;
    assert_eq!(found.map(|p| p.id), Some(participant.id));

    assert!(repo.find_by_email("sam@example").await?.is_none());
    assert!(repo.find_by_email("gone@example.com").await?.is_none());

    Ok(())
}
