//! User service for business logic.
//!
//! This module provides the `UserService` for managing dashboard accounts. It
//! enforces email uniqueness and role existence, hashes passwords before they reach
//! the repository, and records every change in the audit trail.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        role::RoleRepository,
        user::{UserRecord, UserRepository},
    },
    datatable::{ListParams, Page},
    error::{validation::ValidationErrors, AppError},
    model::{
        audit::AuditTarget,
        user::{User, UserParams},
    },
    service::{audit::AuditService, auth::hash_password, require_ids},
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, AppError> {
        Ok(UserRepository::new(self.db).list(params).await?)
    }

    /// Retrieves a live user with their role name.
    ///
    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No live user with that id
    pub async fn show(&self, id: i32) -> Result<User, AppError> {
        let (user, role) = UserRepository::new(self.db)
            .find_with_role(id)
            .await?
            .ok_or_else(not_found)?;

        Ok(User::from_entity(user, role))
    }

    /// Creates a user.
    ///
    /// # Arguments
    /// - `params` - Validated form; the password is required
    /// - `actor` - Id of the user performing the change
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(AppError::Validation)` - Email taken or role unknown
    pub async fn create(&self, params: UserParams, actor: Option<i32>) -> Result<User, AppError> {
        self.check_unique(&params, None).await?;

        let password_hash = match params.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => {
                return Err(
                    ValidationErrors::single("password", "The password field is required.").into(),
                )
            }
        };

        let user = UserRepository::new(self.db)
            .create(UserRecord {
                name: params.name,
                email: params.email,
                role_id: Some(params.role_id),
                password_hash,
            })
            .await?;

        AuditService::new(self.db)
            .created(actor, AuditTarget::User, user.id, &user)
            .await?;

        self.show(user.id).await
    }

    /// Updates a user, keeping the stored password hash when none is given.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::NotFound)` - No live user with that id
    /// - `Err(AppError::Validation)` - Email taken by another user or role unknown
    pub async fn update(
        &self,
        id: i32,
        params: UserParams,
        actor: Option<i32>,
    ) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let before = repo.find_by_id(id).await?.ok_or_else(not_found)?;

        self.check_unique(&params, Some(id)).await?;

        let password_hash = params.password.as_deref().map(hash_password).transpose()?;

        let after = repo
            .update(
                before.clone(),
                UserRecord {
                    name: params.name,
                    email: params.email,
                    role_id: Some(params.role_id),
                    password_hash,
                },
            )
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::User, id, &before, &after)
            .await?;

        self.show(id).await
    }

    pub async fn destroy(&self, id: i32, actor: Option<i32>) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);
        let user = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        let deleted = repo.soft_delete(user).await?;

        AuditService::new(self.db)
            .deleted(actor, AuditTarget::User, id, &deleted)
            .await?;

        Ok(())
    }

    pub async fn bulk_destroy(&self, ids: &[i32], actor: Option<i32>) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = UserRepository::new(self.db);
        let users = repo.find_by_ids(ids).await?;
        let deleted = repo.soft_delete_many(ids).await?;

        let audit = AuditService::new(self.db);
        for user in &users {
            audit.deleted(actor, AuditTarget::User, user.id, user).await?;
        }

        Ok(deleted)
    }

    /// The `email|unique` and `role_id|exists` rules.
    async fn check_unique(&self, params: &UserParams, except: Option<i32>) -> Result<(), AppError> {
        let mut errors = ValidationErrors::new();

        if UserRepository::new(self.db)
            .email_taken(&params.email, except)
            .await?
        {
            errors.add("email", "The email has already been taken.");
        }

        if RoleRepository::new(self.db)
            .find_by_id(params.role_id)
            .await?
            .is_none()
        {
            errors.add("role_id", "The selected role id is invalid.");
        }

        Ok(errors.into_result()?)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
