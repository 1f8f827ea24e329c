use crate::server::{
    data::download_export::{DownloadExportRepository, NewJobRecord},
    datatable::ListParams,
};
use chrono::Utc;
use entity::sea_orm_active_enums::{JobKind, JobStatus};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{download_export::DownloadExportFactory, helpers::at},
};

mod find_stale_pending;
mod list;
mod mark_completed;
