use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::role::ADMIN_ROLE_SLUG,
};

pub enum Permission {
    /// Holds the `administrator` role.
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the logged-in user and checks every permission.
    ///
    /// # Returns
    /// - `Ok(user::Model)` - Live user meeting all permissions
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - The user was deleted
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !self.is_admin(&user).await? {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "User attempted an administrator action without the administrator role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    async fn is_admin(&self, user: &entity::user::Model) -> Result<bool, AppError> {
        let Some(role_id) = user.role_id else {
            return Ok(false);
        };

        let role = RoleRepository::new(self.db).find_by_id(role_id).await?;

        Ok(role.is_some_and(|role| role.slug == ADMIN_ROLE_SLUG))
    }
}
