use super::*;

/// Tests the role column and the relative creation time.
///
/// Expected: role name rendered, searchable, created_at relative
#[tokio::test]
async fn renders_and_searches_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let role = RoleFactory::new(db).name("Finance Clerk").build().await?;
    UserFactory::new(db)
        .name("Lee")
        .role_id(Some(role.id))
        .created_at(chrono::Utc::now() - chrono::Duration::days(3))
        .build()
        .await?;
    factory::create_user(db).await?;

    let page = UserRepository::new(db)
        .list(&ListParams {
            search: Some("clerk".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0]["name"], "Lee");
    assert_eq!(page.rows[0]["role"], "Finance Clerk");
    assert_eq!(page.rows[0]["created_at"], "3 days ago");

    Ok(())
}
