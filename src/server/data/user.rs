//! User data repository.
//!
//! Provides `UserRepository` for dashboard accounts: CRUD with soft deletion, the
//! list columns, email lookups for login and uniqueness checks, and the role join
//! used by the authorization guard.

use chrono::Utc;
use entity::{role, user};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde_json::{json, Value};

use crate::server::{
    datatable::{like_insensitive, DataTable, Field, ListParams, Page},
    model::user::UserRow,
    util::humanize::diff_for_humans,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Column values stored for a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    /// `None` keeps the stored hash on update.
    pub password_hash: Option<String>,
}

/// Dashboard list columns; `created_at` renders relative to the time of the request.
pub fn user_table() -> DataTable<UserRow> {
    let now = Utc::now();

    DataTable::new(Expr::col((user::Entity, user::Column::CreatedAt)))
        .column(Field::new("name").column(Expr::col((user::Entity, user::Column::Name))))
        .column(Field::new("email").column(Expr::col((user::Entity, user::Column::Email))))
        .column(
            Field::new("role")
                .filter(|term| {
                    like_insensitive(Expr::col((role::Entity, role::Column::Name)), term)
                        .and(Expr::col((role::Entity, role::Column::DeletedAt)).is_null())
                })
                .ordering(Expr::col((role::Entity, role::Column::Name)))
                .render(|row: &UserRow| {
                    row.role
                        .as_ref()
                        .map(|r| json!(r.name))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("created_at")
                .column(Expr::col((user::Entity, user::Column::CreatedAt)))
                .searchable(false)
                .render(move |row: &UserRow| json!(diff_for_humans(&row.user.created_at, &now))),
        )
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paginated dashboard list of live users joined with their roles.
    pub async fn list(&self, params: &ListParams) -> Result<Page, DbErr> {
        let query = entity::prelude::User::find()
            .find_also_related(entity::prelude::Role)
            .filter(user::Column::DeletedAt.is_null());

        user_table().fetch(self.db, query, params).await
    }

    /// Finds a live user by id.
    ///
    /// # Arguments
    /// - `id` - User id
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No live user with that id
    /// - `Err(DbErr)` - Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Finds a live user together with their role.
    pub async fn find_with_role(
        &self,
        id: i32,
    ) -> Result<Option<(user::Model, Option<role::Model>)>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .find_also_related(entity::prelude::Role)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .filter(user::Column::DeletedAt.is_null())
            .all(self.db)
            .await
    }

    /// Finds a live user by email, used for login.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Id)
            .one(self.db)
            .await
    }

    /// Whether a live user other than `except` already uses `email`.
    pub async fn email_taken(&self, email: &str, except: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null());

        if let Some(id) = except {
            query = query.filter(user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Whether any live user holds the role `role_id`.
    pub async fn any_with_role(&self, role_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(user::Column::RoleId.eq(role_id))
            .filter(user::Column::DeletedAt.is_null())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(&self, record: UserRecord) -> Result<user::Model, DbErr> {
        let now = Utc::now();

        user::ActiveModel {
            name: ActiveValue::Set(record.name),
            email: ActiveValue::Set(record.email),
            password: ActiveValue::Set(record.password_hash.unwrap_or_default()),
            role_id: ActiveValue::Set(record.role_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(&self, model: user::Model, record: UserRecord) -> Result<user::Model, DbErr> {
        let mut active = model.into_active_model();

        active.name = ActiveValue::Set(record.name);
        active.email = ActiveValue::Set(record.email);
        active.role_id = ActiveValue::Set(record.role_id);
        if let Some(hash) = record.password_hash {
            active.password = ActiveValue::Set(hash);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn soft_delete(&self, model: user::Model) -> Result<user::Model, DbErr> {
        let now = Utc::now();
        let mut active = model.into_active_model();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Soft-deletes the live users among `ids`, returning how many changed.
    pub async fn soft_delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::User::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(now))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
