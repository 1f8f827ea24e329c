//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories query SeaORM entities, honour soft deletion
//! and return entity models; services convert them to domain models. Dashboard list
//! columns live next to the repository that owns the base query.

pub mod audit;
pub mod download_export;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod user;

#[cfg(test)]
mod test;
