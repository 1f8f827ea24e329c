use crate::server::{
    data::audit::{AuditEntry, AuditRepository, AUDIT_PER_PAGE},
    datatable::ListParams,
    model::audit::AuditTarget,
};
use entity::sea_orm_active_enums::AuditEvent;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{audit::AuditFactory, helpers::at, user::UserFactory},
};

mod list;
mod record;
