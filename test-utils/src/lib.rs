//! Seminar Office Test Utils
//!
//! Shared testing utilities for the seminar back office. Provides a builder for test
//! contexts backed by in-memory SQLite databases, an optional session, a scratch storage
//! directory, and factories for inserting entities with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database, session and storage root
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Insert entities with defaults, customised through builders
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn lists_seminars() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_seminar_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
