use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::error::AppError;

mod auth;
mod job;
mod payment;
mod seminar;
mod user;
