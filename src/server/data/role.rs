//! Role data repository.

use chrono::Utc;
use entity::role;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{
    datatable::{DataTable, Field, ListParams, Page},
    model::role::{RoleParams, GUARD_NAME},
};

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Dashboard list columns.
pub fn role_table() -> DataTable<role::Model> {
    DataTable::new(Expr::col((role::Entity, role::Column::CreatedAt)))
        .column(Field::new("name").column(Expr::col((role::Entity, role::Column::Name))))
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, DbErr> {
        let query = entity::prelude::Role::find().filter(role::Column::DeletedAt.is_null());

        role_table().fetch(self.db, query, params).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<role::Model>, DbErr> {
        entity::prelude::Role::find_by_id(id)
            .filter(role::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<role::Model>, DbErr> {
        entity::prelude::Role::find()
            .filter(role::Column::Id.is_in(ids.iter().copied()))
            .filter(role::Column::DeletedAt.is_null())
            .all(self.db)
            .await
    }

    /// Finds the oldest live role with `slug`.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<role::Model>, DbErr> {
        entity::prelude::Role::find()
            .filter(role::Column::Slug.eq(slug))
            .filter(role::Column::DeletedAt.is_null())
            .order_by_asc(role::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn create(&self, params: RoleParams) -> Result<role::Model, DbErr> {
        let now = Utc::now();

        role::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            guard_name: ActiveValue::Set(GUARD_NAME.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(&self, model: role::Model, params: RoleParams) -> Result<role::Model, DbErr> {
        let mut active = model.into_active_model();
        active.name = ActiveValue::Set(params.name);
        active.slug = ActiveValue::Set(params.slug);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    pub async fn soft_delete(&self, model: role::Model) -> Result<role::Model, DbErr> {
        let now = Utc::now();
        let mut active = model.into_active_model();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Soft-deletes the live roles among `ids`, returning how many changed.
    pub async fn soft_delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::Role::update_many()
            .col_expr(role::Column::DeletedAt, Expr::value(now))
            .col_expr(role::Column::UpdatedAt, Expr::value(now))
            .filter(role::Column::Id.is_in(ids.iter().copied()))
            .filter(role::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
