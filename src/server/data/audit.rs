//! Audit trail repository.
//!
//! Records change events for managed entities and lists them for the dashboard,
//! optionally narrowed to one target kind or one target record.

use chrono::Utc;
use entity::{audit, sea_orm_active_enums::AuditEvent, user};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use serde_json::{json, Value};

use crate::server::{
    datatable::{like_insensitive, DataTable, Field, ListParams, Page},
    model::audit::{event_name, AuditRow, AuditTarget},
    util::{
        humanize::diff_for_humans,
        parse::{format_datetime, title_case},
    },
};

/// Default page size of the audit list.
pub const AUDIT_PER_PAGE: u64 = 7;

pub struct AuditRepository<'a> {
    db: &'a DatabaseConnection,
}

/// One change to record.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: Option<i32>,
    pub event: AuditEvent,
    pub target: AuditTarget,
    pub auditable_id: String,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
}

/// Dashboard list columns. `viewer` renders as "You" in the user column.
pub fn audit_table(viewer: Option<i32>) -> DataTable<AuditRow> {
    let now = Utc::now();

    DataTable::new(Expr::col((audit::Entity, audit::Column::CreatedAt)))
        .per_page(AUDIT_PER_PAGE)
        .column(
            Field::new("event")
                .column(Expr::col((audit::Entity, audit::Column::Event)))
                .searchable(false)
                .render(|row: &AuditRow| json!(title_case(event_name(row.audit.event)))),
        )
        .column(
            Field::new("user")
                .filter(|term| {
                    like_insensitive(Expr::col((user::Entity, user::Column::Name)), term).or(
                        like_insensitive(
                            Expr::col((audit::Entity, audit::Column::AuditableType)),
                            term,
                        ),
                    )
                })
                .ordering(Expr::col((user::Entity, user::Column::Id)))
                .render(move |row: &AuditRow| {
                    if viewer.is_some() && row.audit.user_id == viewer {
                        return json!("You");
                    }
                    row.user
                        .as_ref()
                        .map(|u| json!(u.name))
                        .unwrap_or(Value::Null)
                }),
        )
        .column(
            Field::new("created_at")
                .column(Expr::col((audit::Entity, audit::Column::CreatedAt)))
                .searchable(false)
                .render(|row: &AuditRow| json!(format_datetime(&row.audit.created_at))),
        )
        .column(
            Field::new("human_readable")
                .render(move |row: &AuditRow| json!(diff_for_humans(&row.audit.created_at, &now))),
        )
        .column(Field::new("note").render(|row: &AuditRow| {
            let label = AuditTarget::from_slug(&row.audit.auditable_type)
                .map(AuditTarget::label)
                .unwrap_or(row.audit.auditable_type.as_str());
            json!(format!("{} {}", title_case(event_name(row.audit.event)), label))
        }))
}

impl<'a> AuditRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts one audit row stamped with the current time.
    pub async fn record(&self, entry: AuditEntry) -> Result<audit::Model, DbErr> {
        audit::ActiveModel {
            user_id: ActiveValue::Set(entry.user_id),
            event: ActiveValue::Set(entry.event),
            auditable_type: ActiveValue::Set(entry.target.slug().to_string()),
            auditable_id: ActiveValue::Set(entry.auditable_id),
            old_values: ActiveValue::Set(entry.old_values),
            new_values: ActiveValue::Set(entry.new_values),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Paginated audit list joined with the acting user.
    ///
    /// # Arguments
    /// - `params` - Request list parameters
    /// - `target` - Restricts rows to one target kind when set
    /// - `auditable_id` - Restricts rows to one target record when set
    /// - `viewer` - Id of the requesting user, rendered as "You"
    pub async fn list(
        &self,
        params: &ListParams,
        target: Option<AuditTarget>,
        auditable_id: Option<&str>,
        viewer: Option<i32>,
    ) -> Result<Page, DbErr> {
        let mut query = entity::prelude::Audit::find().find_also_related(entity::prelude::User);

        if let Some(target) = target {
            query = query.filter(audit::Column::AuditableType.eq(target.slug()));
        }
        if let Some(id) = auditable_id {
            query = query.filter(audit::Column::AuditableId.eq(id));
        }

        audit_table(viewer).fetch(self.db, query, params).await
    }
}
