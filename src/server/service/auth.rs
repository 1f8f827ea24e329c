//! Password authentication and the administrator seed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::AdminSeed,
    data::{
        role::RoleRepository,
        user::{UserRecord, UserRepository},
    },
    error::{auth::AuthError, AppError},
    model::{
        role::{RoleParams, ADMIN_ROLE_SLUG},
        user::User,
    },
};

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored PHC string; malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies credentials against a live account.
    ///
    /// # Returns
    /// - `Ok(User)` - Email and password match
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_email(email.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let (user, role) = repo
            .find_with_role(user.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(User::from_entity(user, role))
    }

    /// Creates the administrator role and account unless a live user already
    /// holds the role.
    ///
    /// # Returns
    /// - `Ok(true)` - An administrator was created
    /// - `Ok(false)` - An administrator already exists
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool, AppError> {
        let roles = RoleRepository::new(self.db);
        let users = UserRepository::new(self.db);

        let role = match roles.find_by_slug(ADMIN_ROLE_SLUG).await? {
            Some(role) => role,
            None => roles.create(RoleParams::new("Administrator")).await?,
        };

        if users.any_with_role(role.id).await? {
            return Ok(false);
        }

        if users.email_taken(&seed.email, None).await? {
            tracing::warn!(
                "Administrator email {} belongs to an existing user; seed skipped",
                seed.email
            );
            return Ok(false);
        }

        users
            .create(UserRecord {
                name: "Administrator".to_string(),
                email: seed.email.clone(),
                role_id: Some(role.id),
                password_hash: Some(hash_password(&seed.password)?),
            })
            .await?;

        tracing::info!("Seeded administrator account {}", seed.email);

        Ok(true)
    }
}
