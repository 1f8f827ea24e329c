//! Seminar data repository.
//!
//! Provides `SeminarRepository` for seminar CRUD, soft deletion, the dashboard list
//! columns and the lookups used by exports and imports. Soft-deleted seminars are
//! invisible to every query here.

use std::collections::HashMap;

use chrono::Utc;
use entity::{seminar, user};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::server::{
    datatable::{like_insensitive, DataTable, Field, ListParams, Page},
    model::seminar::{SeminarParams, SeminarRow},
    util::parse::format_datetime,
};

pub struct SeminarRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Dashboard list columns.
pub fn seminar_table() -> DataTable<SeminarRow> {
    DataTable::new(Expr::col((seminar::Entity, seminar::Column::CreatedAt)))
        .column(Field::new("title").column(Expr::col((seminar::Entity, seminar::Column::Title))))
        .column(
            Field::new("description")
                .column(Expr::col((seminar::Entity, seminar::Column::Description))),
        )
        .column(
            Field::new("schedule")
                .column(Expr::col((seminar::Entity, seminar::Column::Schedule)))
                .render(|row: &SeminarRow| json!(format_datetime(&row.seminar.schedule))),
        )
        .column(
            Field::new("created_by")
                .filter(|term| {
                    like_insensitive(Expr::col((user::Entity, user::Column::Name)), term)
                        .and(Expr::col((user::Entity, user::Column::DeletedAt)).is_null())
                })
                .ordering(Expr::col((user::Entity, user::Column::Name)))
                .render(|row: &SeminarRow| {
                    row.owner
                        .as_ref()
                        .map(|owner| json!(owner.name))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("is_active")
                .column(Expr::col((seminar::Entity, seminar::Column::IsActive)))
                .searchable(false),
        )
}

impl<'a> SeminarRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paginated dashboard list of live seminars joined with their owners.
    pub async fn list(&self, params: &ListParams) -> Result<Page, DbErr> {
        let query = entity::prelude::Seminar::find()
            .find_also_related(entity::prelude::User)
            .filter(seminar::Column::DeletedAt.is_null());

        seminar_table().fetch(self.db, query, params).await
    }

    /// Finds a live seminar by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<seminar::Model>, DbErr> {
        entity::prelude::Seminar::find_by_id(id)
            .filter(seminar::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Finds live seminars among `ids`.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<seminar::Model>, DbErr> {
        entity::prelude::Seminar::find()
            .filter(seminar::Column::Id.is_in(ids.iter().copied()))
            .filter(seminar::Column::DeletedAt.is_null())
            .all(self.db)
            .await
    }

    /// First live seminar whose title contains `title`, oldest first.
    pub async fn find_by_title_like(&self, title: &str) -> Result<Option<seminar::Model>, DbErr> {
        entity::prelude::Seminar::find()
            .filter(seminar::Column::Title.contains(title))
            .filter(seminar::Column::DeletedAt.is_null())
            .order_by_asc(seminar::Column::CreatedAt)
            .one(self.db)
            .await
    }

    /// Inserts a seminar owned by `user_id`.
    pub async fn create(
        &self,
        params: SeminarParams,
        user_id: Option<i32>,
    ) -> Result<seminar::Model, DbErr> {
        let now = Utc::now();

        seminar::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            schedule: ActiveValue::Set(params.schedule),
            is_active: ActiveValue::Set(params.is_active.unwrap_or(false)),
            additional_info: ActiveValue::Set(params.additional_info.to_json()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    /// Overwrites the editable fields of `model`.
    pub async fn update(
        &self,
        model: seminar::Model,
        params: SeminarParams,
    ) -> Result<seminar::Model, DbErr> {
        let mut active = model.into_active_model();

        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.schedule = ActiveValue::Set(params.schedule);
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.additional_info = ActiveValue::Set(params.additional_info.to_json());
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_active(
        &self,
        model: seminar::Model,
        is_active: bool,
    ) -> Result<seminar::Model, DbErr> {
        let mut active = model.into_active_model();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Stamps `deleted_at` on a seminar.
    pub async fn soft_delete(&self, model: seminar::Model) -> Result<seminar::Model, DbErr> {
        let now = Utc::now();
        let mut active = model.into_active_model();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Soft-deletes the live seminars among `ids`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of seminars deleted
    /// - `Err(DbErr)` - Database error
    pub async fn soft_delete_many(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::Seminar::update_many()
            .col_expr(seminar::Column::DeletedAt, Expr::value(now))
            .col_expr(seminar::Column::UpdatedAt, Expr::value(now))
            .filter(seminar::Column::Id.is_in(ids.iter().copied()))
            .filter(seminar::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Every live seminar with its owner and live participant count, for exports.
    pub async fn all_with_owner_and_counts(
        &self,
    ) -> Result<Vec<(seminar::Model, Option<user::Model>, i64)>, DbErr> {
        let seminars = entity::prelude::Seminar::find()
            .find_also_related(entity::prelude::User)
            .filter(seminar::Column::DeletedAt.is_null())
            .order_by_asc(seminar::Column::CreatedAt)
            .all(self.db)
            .await?;

        let counts: HashMap<Uuid, i64> = entity::prelude::Participant::find()
            .select_only()
            .column(entity::participant::Column::SeminarId)
            .column_as(entity::participant::Column::Id.count(), "count")
            .filter(entity::participant::Column::DeletedAt.is_null())
            .group_by(entity::participant::Column::SeminarId)
            .into_tuple::<(Uuid, i64)>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        Ok(seminars
            .into_iter()
            .map(|(seminar, owner)| {
                let count = counts.get(&seminar.id).copied().unwrap_or(0);
                let owner = owner.filter(|u| u.deleted_at.is_none());
                (seminar, owner, count)
            })
            .collect())
    }
}
