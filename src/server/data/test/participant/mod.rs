use crate::server::{
    data::participant::ParticipantRepository, datatable::ListParams,
};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, participant::ParticipantFactory, seminar::SeminarFactory},
};

mod find_by_email;
mod list;
