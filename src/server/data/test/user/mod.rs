use crate::server::{data::user::UserRepository, datatable::ListParams};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, role::RoleFactory, user::UserFactory},
};

mod email_taken;
mod list;
