use super::*;

/// Tests email uniqueness among live users.
///
/// Expected: taken for other users, free for the owner and for deleted users
#[tokio::test]
async fn checks_live_users_except_self() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).email("kim@example.com").build().await?;
    let gone = UserFactory::new(db).email("old@example.com").build().await?;

    let repo = UserRepository::new(db);
    repo.soft_delete(gone).await?;

    assert!(repo.email_taken("kim@example.com", None).await?);
    assert!(!repo.email_taken("kim@example.com", Some(user.id)).await?);
    assert!(!repo.email_taken("old@example.com", None).await?);

    Ok(())
}
