//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM over Sqlite for persistence.
//! Spreadsheet exports and imports run on a background job queue.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic and audit trail between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and list queries
//! - **Model Layer** (`model/`) - Domain models and validated parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session access and authentication guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, storage, job queue)
//! - **Startup** (`startup`) - Database, session store and administrator seed
//! - **Router** (`router`) - Route table and OpenAPI document
//! - **Data tables** (`datatable/`) - Search, ordering and pagination for list endpoints
//! - **Jobs** (`jobs/`) - Export and import workers with retries
//! - **Scheduler** (`scheduler/`) - Cron sweep re-queueing stale pending jobs
//! - **Storage** (`storage`) - Private and public file disks
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** resolves the session user and checks permissions
//! 3. **Controller** validates input, converts DTOs to params, calls service
//! 4. **Service** executes business logic and writes audit entries
//! 5. **Data** queries database and returns entity models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod datatable;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod storage;
pub mod util;
