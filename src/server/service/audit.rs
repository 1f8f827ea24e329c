//! Audit trail service.
//!
//! Every create, update and delete of a managed entity goes through `AuditService`,
//! which snapshots the entity as JSON. Updates store only the attributes that
//! changed, with their old and new values.

use entity::sea_orm_active_enums::AuditEvent;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::server::{
    data::audit::{AuditEntry, AuditRepository},
    datatable::{ListParams, Page},
    error::AppError,
    model::audit::AuditTarget,
};

/// Attributes never reported as changes.
const IGNORED_ATTRIBUTES: [&str; 2] = ["updated_at", "created_at"];

pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

fn snapshot<T: Serialize>(model: &T) -> Option<Value> {
    serde_json::to_value(model).ok()
}

/// Splits two snapshots into the old and new values of changed attributes.
fn changes(before: Option<Value>, after: Option<Value>) -> (Option<Value>, Option<Value>) {
    let (Some(Value::Object(before)), Some(Value::Object(after))) = (before, after) else {
        return (None, None);
    };

    let mut old = Map::new();
    let mut new = Map::new();

    for (key, value) in after {
        if IGNORED_ATTRIBUTES.contains(&key.as_str()) {
            continue;
        }
        let previous = before.get(&key).cloned().unwrap_or(Value::Null);
        if previous != value {
            old.insert(key.clone(), previous);
            new.insert(key, value);
        }
    }

    (Some(Value::Object(old)), Some(Value::Object(new)))
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the creation of `model`.
    pub async fn created<T: Serialize>(
        &self,
        actor: Option<i32>,
        target: AuditTarget,
        id: impl ToString,
        model: &T,
    ) -> Result<(), DbErr> {
        self.record(actor, AuditEvent::Created, target, id, None, snapshot(model))
            .await
    }

    /// Records an update, storing only the changed attributes.
    pub async fn updated<T: Serialize>(
        &self,
        actor: Option<i32>,
        target: AuditTarget,
        id: impl ToString,
        before: &T,
        after: &T,
    ) -> Result<(), DbErr> {
        let (old, new) = changes(snapshot(before), snapshot(after));
        self.record(actor, AuditEvent::Updated, target, id, old, new)
            .await
    }

    /// Records the deletion of `model`.
    pub async fn deleted<T: Serialize>(
        &self,
        actor: Option<i32>,
        target: AuditTarget,
        id: impl ToString,
        model: &T,
    ) -> Result<(), DbErr> {
        self.record(actor, AuditEvent::Deleted, target, id, snapshot(model), None)
            .await
    }

    async fn record(
        &self,
        actor: Option<i32>,
        event: AuditEvent,
        target: AuditTarget,
        id: impl ToString,
        old_values: Option<Value>,
        new_values: Option<Value>,
    ) -> Result<(), DbErr> {
        AuditRepository::new(self.db)
            .record(AuditEntry {
                user_id: actor,
                event,
                target,
                auditable_id: id.to_string(),
                old_values,
                new_values,
            })
            .await?;

        Ok(())
    }

    /// Lists audit rows, optionally narrowed to a target kind and record.
    ///
    /// An unknown `slug` applies no kind filter.
    ///
    /// # Arguments
    /// - `params` - Request list parameters
    /// - `slug` - Target kind slug such as `seminars`
    /// - `id` - Target record id
    /// - `viewer` - Requesting user, rendered as "You"
    pub async fn list(
        &self,
        params: &ListParams,
        slug: Option<&str>,
        id: Option<&str>,
        viewer: i32,
    ) -> Result<Page, AppError> {
        let target = slug.and_then(AuditTarget::from_slug);

        let page = AuditRepository::new(self.db)
            .list(params, target, id, Some(viewer))
            .await?;

        Ok(page)
    }
}
