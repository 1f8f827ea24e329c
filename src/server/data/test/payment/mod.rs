use crate::server::{
    data::payment::{PaymentRecord, PaymentRepository},
    datatable::ListParams,
};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{helpers::create_payment_with_dependencies, payment::PaymentFactory},
};

mod list;
mod update;
