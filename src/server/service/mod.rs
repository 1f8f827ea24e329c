//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Existence checks, uniqueness rules and file handling
//! - **Orchestration**: Coordinating repositories, storage and the job queue
//! - **Domain Models**: Returning domain models rather than DTOs or entity models
//! - **Audit Trail**: Recording every change to a managed entity

pub mod audit;
pub mod auth;
pub mod download;
pub mod job;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod user;

#[cfg(test)]
mod test;

use crate::server::error::AppError;

/// Rejects an empty bulk id list with 400 "No IDs provided".
pub fn require_ids<T>(ids: &[T]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::BadRequest("No IDs provided".to_string()));
    }
    Ok(())
}
