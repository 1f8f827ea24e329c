//! Role factory for creating test role entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test roles.
pub struct RoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
}

impl<'a> RoleFactory<'a> {
    /// Creates a new RoleFactory with defaults `"Role {id}"` / `"role-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Role {}", id),
            slug: format!("role-{}", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builds and inserts the role entity into the database.
    pub async fn build(self) -> Result<entity::role::Model, DbErr> {
        let now = Utc::now();
        entity::role::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            guard_name: ActiveValue::Set("web".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a role with default values.
pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db).build().await
}

/// Creates the `administrator` role.
pub async fn create_admin_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db)
        .name("Administrator")
        .slug("administrator")
        .build()
        .await
}
