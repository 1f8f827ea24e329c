//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Parameter types are built from request DTOs and carry already-validated input, so
//! services never see raw form data.

pub mod audit;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod upload;
pub mod user;
