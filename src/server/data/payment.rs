//! Payment data repository.

use chrono::Utc;
use entity::{participant, payment};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::server::{
    datatable::{like_insensitive, DataTable, Field, ListParams, Page},
    model::payment::{public_url, PaymentRow},
    util::parse::format_datetime,
};

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Column values stored for a payment; the file path is already on disk.
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub participant_id: Uuid,
    pub file_path: Option<String>,
    pub uploaded_at: Option<chrono::DateTime<Utc>>,
    pub is_verified: Option<bool>,
    pub metadata: Option<Value>,
}

fn participant_field(name: &'static str, column: participant::Column) -> Field<PaymentRow> {
    Field::new(name)
        .filter(move |term| {
            like_insensitive(Expr::col((participant::Entity, column)), term).and(
                Expr::col((participant::Entity, participant::Column::DeletedAt)).is_null(),
            )
        })
        .ordering(Expr::col((participant::Entity, column)))
        .render(move |row: &PaymentRow| {
            row.participant
                .as_ref()
                .map(|p| match column {
                    participant::Column::Email => json!(p.email),
                    _ => json!(p.name),
                })
                .unwrap_or(Value::Null)
        })
}

/// Dashboard list columns; `file_path` renders as a public URL under `app_url`.
pub fn payment_table(app_url: &str) -> DataTable<PaymentRow> {
    let app_url = app_url.to_string();

    DataTable::new(Expr::col((payment::Entity, payment::Column::CreatedAt)))
        .column(participant_field("participant_name", participant::Column::Name))
        .column(participant_field("participant_email", participant::Column::Email))
        .column(
            Field::new("uploaded_at")
                .column(Expr::col((payment::Entity, payment::Column::UploadedAt)))
                .render(|row: &PaymentRow| {
                    row.payment
                        .uploaded_at
                        .as_ref()
                        .map(|at| json!(format_datetime(at)))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("file_path")
                .column(Expr::col((payment::Entity, payment::Column::FilePath)))
                .render(move |row: &PaymentRow| {
                    row.payment
                        .file_path
                        .as_deref()
                        .map(|path| json!(public_url(&app_url, path)))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("is_verified")
                .column(Expr::col((payment::Entity, payment::Column::IsVerified)))
                .searchable(false),
        )
}

impl<'a> PaymentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paginated dashboard list of live payments joined with their participants.
    pub async fn list(&self, params: &ListParams, app_url: &str) -> Result<Page, DbErr> {
        let query = entity::prelude::Payment::find()
            .find_also_related(entity::prelude::Participant)
            .filter(payment::Column::DeletedAt.is_null());

        payment_table(app_url).fetch(self.db, query, params).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<payment::Model>, DbErr> {
        entity::prelude::Payment::find_by_id(id)
            .filter(payment::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Finds a live payment together with its participant.
    pub async fn find_with_participant(
        &self,
        id: Uuid,
    ) -> Result<Option<(payment::Model, Option<participant::Model>)>, DbErr> {
        entity::prelude::Payment::find_by_id(id)
            .find_also_related(entity::prelude::Participant)
            .filter(payment::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(payment::Column::Id.is_in(ids.iter().copied()))
            .filter(payment::Column::DeletedAt.is_null())
            .all(self.db)
            .await
    }

    pub async fn create(&self, record: PaymentRecord) -> Result<payment::Model, DbErr> {
        let now = Utc::now();

        payment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            participant_id: ActiveValue::Set(record.participant_id),
            file_path: ActiveValue::Set(record.file_path),
            uploaded_at: ActiveValue::Set(record.uploaded_at),
            is_verified: ActiveValue::Set(record.is_verified.unwrap_or(false)),
            metadata: ActiveValue::Set(record.metadata),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    /// Overwrites the editable fields; a `None` file path keeps the stored one.
    pub async fn update(
        &self,
        model: payment::Model,
        record: PaymentRecord,
    ) -> Result<payment::Model, DbErr> {
        let mut active = model.into_active_model();

        active.participant_id = ActiveValue::Set(record.participant_id);
        if record.file_path.is_some() {
            active.file_path = ActiveValue::Set(record.file_path);
        }
        active.uploaded_at = ActiveValue::Set(record.uploaded_at);
        if let Some(is_verified) = record.is_verified {
            active.is_verified = ActiveValue::Set(is_verified);
        }
        active.metadata = ActiveValue::Set(record.metadata);
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_verified(
        &self,
        model: payment::Model,
        is_verified: bool,
    ) -> Result<payment::Model, DbErr> {
        let mut active = model.into_active_model();
        active.is_verified = ActiveValue::Set(is_verified);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    pub async fn soft_delete(&self, model: payment::Model) -> Result<payment::Model, DbErr> {
        let now = Utc::now();
        let mut active = model.into_active_model();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Soft-deletes the live payments among `ids`, returning how many changed.
    pub async fn soft_delete_many(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::Payment::update_many()
            .col_expr(payment::Column::DeletedAt, Expr::value(now))
            .col_expr(payment::Column::UpdatedAt, Expr::value(now))
            .filter(payment::Column::Id.is_in(ids.iter().copied()))
            .filter(payment::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Every live payment with its participant, for exports.
    pub async fn all_with_participant(
        &self,
    ) -> Result<Vec<(payment::Model, Option<participant::Model>)>, DbErr> {
        let rows = entity::prelude::Payment::find()
            .find_also_related(entity::prelude::Participant)
            .filter(payment::Column::DeletedAt.is_null())
            .order_by_asc(payment::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(p, participant)| (p, participant.filter(|p| p.deleted_at.is_none())))
            .collect())
    }
}
