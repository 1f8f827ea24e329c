//! Participant data repository.

use chrono::Utc;
use entity::{participant, seminar};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::server::{
    datatable::{like_insensitive, DataTable, Field, ListParams, Page},
    model::participant::{ParticipantParams, ParticipantRow},
    util::parse::format_datetime,
};

pub struct ParticipantRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Dashboard list columns.
pub fn participant_table() -> DataTable<ParticipantRow> {
    DataTable::new(Expr::col((participant::Entity, participant::Column::CreatedAt)))
        .column(
            Field::new("seminar")
                .filter(|term| {
                    like_insensitive(Expr::col((seminar::Entity, seminar::Column::Title)), term)
                        .and(Expr::col((seminar::Entity, seminar::Column::DeletedAt)).is_null())
                })
                .ordering(Expr::col((seminar::Entity, seminar::Column::Title)))
                .render(|row: &ParticipantRow| {
                    row.seminar
                        .as_ref()
                        .map(|s| json!(s.title))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("name").column(Expr::col((participant::Entity, participant::Column::Name))),
        )
        .column(
            Field::new("email")
                .column(Expr::col((participant::Entity, participant::Column::Email))),
        )
        .column(
            Field::new("registered_at")
                .column(Expr::col((participant::Entity, participant::Column::RegisteredAt)))
                .render(|row: &ParticipantRow| {
                    row.participant
                        .registered_at
                        .as_ref()
                        .map(|at| json!(format_datetime(at)))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("is_confirmed")
                .column(Expr::col((participant::Entity, participant::Column::IsConfirmed)))
                .searchable(false),
        )
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paginated dashboard list of live participants joined with their seminars.
    pub async fn list(&self, params: &ListParams) -> Result<Page, DbErr> {
        let query = entity::prelude::Participant::find()
            .find_also_related(entity::prelude::Seminar)
            .filter(participant::Column::DeletedAt.is_null());

        participant_table().fetch(self.db, query, params).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<participant::Model>, DbErr> {
        entity::prelude::Participant::find_by_id(id)
            .filter(participant::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<participant::Model>, DbErr> {
        entity::prelude::Participant::find()
            .filter(participant::Column::Id.is_in(ids.iter().copied()))
            .filter(participant::Column::DeletedAt.is_null())
            .all(self.db)
            .await
    }

    /// First live participant with exactly this email, oldest first.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<participant::Model>, DbErr> {
        entity::prelude::Participant::find()
            .filter(participant::Column::Email.eq(email))
            .filter(participant::Column::DeletedAt.is_null())
            .order_by_asc(participant::Column::CreatedAt)
            .one(self.db)
            .await
    }

    pub async fn create(&self, params: ParticipantParams) -> Result<participant::Model, DbErr> {
        let now = Utc::now();

        participant::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            seminar_id: ActiveValue::Set(params.seminar_id),
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            registered_at: ActiveValue::Set(params.registered_at),
            extra_data: ActiveValue::Set(params.extra_data.to_json()),
            is_confirmed: ActiveValue::Set(params.is_confirmed),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        model: participant::Model,
        params: ParticipantParams,
    ) -> Result<participant::Model, DbErr> {
        let mut active = model.into_active_model();

        active.seminar_id = ActiveValue::Set(params.seminar_id);
        active.name = ActiveValue::Set(params.name);
        active.email = ActiveValue::Set(params.email);
        active.registered_at = ActiveValue::Set(params.registered_at);
        active.extra_data = ActiveValue::Set(params.extra_data.to_json());
        if params.is_confirmed.is_some() {
            active.is_confirmed = ActiveValue::Set(params.is_confirmed);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_confirmed(
        &self,
        model: participant::Model,
        is_confirmed: bool,
    ) -> Result<participant::Model, DbErr> {
        let mut active = model.into_active_model();
        active.is_confirmed = ActiveValue::Set(Some(is_confirmed));
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    pub async fn soft_delete(&self, model: participant::Model) -> Result<participant::Model, DbErr> {
        let now = Utc::now();
        let mut active = model.into_active_model();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Soft-deletes the live participants among `ids`, returning how many changed.
    pub async fn soft_delete_many(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::Participant::update_many()
            .col_expr(participant::Column::DeletedAt, Expr::value(now))
            .col_expr(participant::Column::UpdatedAt, Expr::value(now))
            .filter(participant::Column::Id.is_in(ids.iter().copied()))
            .filter(participant::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Every live participant with its seminar, for exports.
    pub async fn all_with_seminar(
        &self,
    ) -> Result<Vec<(participant::Model, Option<seminar::Model>)>, DbErr> {
        let rows = entity::prelude::Participant::find()
            .find_also_related(entity::prelude::Seminar)
            .filter(participant::Column::DeletedAt.is_null())
            .order_by_asc(participant::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(p, s)| (p, s.filter(|s| s.deleted_at.is_none())))
            .collect())
    }
}
