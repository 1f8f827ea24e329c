//! SeaORM entity models for the seminar back office.
//!
//! One module per table. Models derive `Serialize` so list views can project their
//! fields by name.

pub mod prelude;

pub mod audit;
pub mod download_export;
pub mod participant;
pub mod payment;
pub mod role;
pub mod sea_orm_active_enums;
pub mod seminar;
pub mod user;
