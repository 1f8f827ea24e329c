//! Wire-level data transfer objects shared by every API endpoint.

pub mod api;
pub mod auth;
pub mod datatable;
pub mod metadata;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod user;
