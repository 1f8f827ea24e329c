//! HTTP request handlers.
//!
//! Handlers authenticate through `AuthGuard`, turn request DTOs into validated
//! parameter types, call a service and convert the returned domain model back
//! into a DTO. Every handler carries a `utoipa::path` annotation; the router
//! collects them into the OpenAPI document.

pub mod audit;
pub mod auth;
pub mod download;
pub mod multipart;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod user;

/// Tags for grouping endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";
pub static SEMINAR_TAG: &str = "seminars";
pub static PARTICIPANT_TAG: &str = "participants";
pub static PAYMENT_TAG: &str = "payments";
pub static ROLE_TAG: &str = "roles";
pub static USER_TAG: &str = "users";
pub static DOWNLOAD_TAG: &str = "downloads";
pub static AUDIT_TAG: &str = "audits";
