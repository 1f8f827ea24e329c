use crate::server::{
    data::role::RoleRepository,
    model::role::{RoleParams, GUARD_NAME},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod create;
