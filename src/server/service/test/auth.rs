use super::*;
use crate::server::{
    config::AdminSeed,
    error::auth::AuthError,
    service::auth::{hash_password, AuthService},
};

/// Tests login with correct and incorrect credentials.
///
/// Expected: Ok for the right password, InvalidCredentials otherwise
#[tokio::test]
async fn login_verifies_password() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let hash = hash_password("correct horse").unwrap();
    let user = factory::user::UserFactory::new(db)
        .email("kim@example.com")
        .password_hash(hash)
        .build()
        .await?;

    let service = AuthService::new(db);

    let logged_in = service.login("kim@example.com", "correct horse").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    assert!(matches!(
        service.login("kim@example.com", "wrong").await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        service.login("nobody@example.com", "correct horse").await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests that the administrator seed runs once.
///
/// Expected: first call creates role and user, second call is a no-op
#[tokio::test]
async fn seeds_admin_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let seed = AdminSeed {
        email: "admin@example.com".to_string(),
        password: "password123".to_string(),
    };
    let service = AuthService::new(db);

    assert!(service.seed_admin(&seed).await.unwrap());
    assert!(!service.seed_admin(&seed).await.unwrap());

    assert_eq!(entity::prelude::Role::find().count(db).await?, 1);
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    let admin = service.login("admin@example.com", "password123").await.unwrap();
    assert_eq!(admin.role.as_deref(), Some("Administrator"));

    Ok(())
}
