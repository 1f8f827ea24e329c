use super::*;
use crate::server::{
    model::user::UserParams,
    service::{auth::verify_password, user::UserService},
};

fn params(email: &str, role_id: i32, password: Option<&str>) -> UserParams {
    UserParams {
        name: "Robin".to_string(),
        email: email.to_string(),
        role_id,
        password: password.map(str::to_string),
    }
}

/// Tests that a taken email and an unknown role are both reported.
///
/// Expected: Err(Validation) with errors on email and role_id
#[tokio::test]
async fn create_checks_email_and_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_user(db).await?;

    let result = UserService::new(db)
        .create(params(&existing.email, 9999, Some("password123")), None)
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation errors");
    };
    assert!(errors.has("email"));
    assert!(errors.has("role_id"));

    Ok(())
}

/// Tests that update without a password keeps the stored hash.
///
/// Expected: same hash after update; own email is not treated as taken
#[tokio::test]
async fn update_keeps_password_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    let service = UserService::new(db);

    let created = service
        .create(params("robin@example.com", role.id, Some("password123")), None)
        .await
        .unwrap();
    let before = entity::prelude::User::find_by_id(created.id)
        .one(db)
        .await?
        .unwrap();
    assert!(verify_password("password123", &before.password));

    let updated = service
        .update(created.id, params("robin@example.com", role.id, None), None)
        .await
        .unwrap();
    assert_eq!(updated.role.as_deref(), Some(role.name.as_str()));

    let after = entity::prelude::User::find_by_id(created.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(after.password, before.password);

    Ok(())
}
