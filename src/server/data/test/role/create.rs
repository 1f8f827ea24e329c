use super::*;

/// Tests that created roles carry the derived slug and the web guard.
///
/// Expected: slug "finance-clerk", guard "web", found by slug
#[tokio::test]
async fn creates_role_with_slug_and_guard() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    let role = repo.create(RoleParams::new("Finance Clerk")).await?;

    assert_eq!(role.slug, "finance-clerk");
    assert_eq!(role.guard_name, GUARD_NAME);

    let found = repo.find_by_slug("finance-clerk").await?;
    assert_eq!(found.map(|r| r.id), Some(role.id));

    repo.soft_delete(role).await?;
    assert!(repo.find_by_slug("finance-clerk").await?.is_none());

    Ok(())
}
