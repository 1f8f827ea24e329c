use crate::server::{
    data::seminar::SeminarRepository,
    datatable::{ListParams, SortDirection},
    model::seminar::SeminarParams,
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::at, seminar::SeminarFactory, user::UserFactory},
};

mod create;
mod find_by_title_like;
mod list;
mod soft_delete_many;
