use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
};
use test_utils::{builder::TestBuilder, factory};

/// Tests an administrator passing the admin check.
///
/// Expected: Ok(User) for the session user
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let role = factory::role::create_admin_role(db).await?;
    let user = factory::user::UserFactory::new(db)
        .name("AdminUser")
        .role_id(Some(role.id))
        .build()
        .await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let returned = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(returned.id, user.id);
    assert_eq!(returned.name, "AdminUser");

    Ok(())
}

/// Tests a user with an ordinary role against the admin check.
///
/// Expected: Err(AccessDenied) for admin, Ok with no permissions
#[tokio::test]
async fn denies_access_to_non_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let role = factory::create_role(db).await?;
    let user = factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let guard = AuthGuard::new(db, session);

    match guard.require(&[Permission::Admin]).await {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, user.id);
            assert!(message.contains("administrator"));
        }
        other => panic!("expected AccessDenied, got {:?}", other.map(|u| u.id)),
    }

    assert!(guard.require(&[]).await.is_ok());

    Ok(())
}

/// Tests an empty session.
///
/// Expected: Err(UserNotInSession)
#[tokio::test]
async fn rejects_missing_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a soft-deleted user.
///
/// Expected: Err(UserNotInDatabase) with the stale id
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    crate::server::data::user::UserRepository::new(db)
        .soft_delete(user.clone())
        .await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) if id == user.id
    ));

    Ok(())
}
