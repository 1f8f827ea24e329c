use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, optionally request a scratch storage directory, then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_all_tables()
///     .with_storage()
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,

    /// Whether `build()` should create a temporary storage root.
    storage: bool,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            storage: false,
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the account tables: Role and User.
    pub fn with_account_tables(self) -> Self {
        self.with_table(Role).with_table(User)
    }

    /// Adds every table a seminar workflow touches, in dependency order:
    /// Role, User, Seminar, Participant, Payment.
    pub fn with_seminar_tables(self) -> Self {
        self.with_account_tables()
            .with_table(Seminar)
            .with_table(Participant)
            .with_table(Payment)
    }

    /// Adds the seminar tables plus the job record and audit tables.
    pub fn with_all_tables(self) -> Self {
        self.with_seminar_tables()
            .with_table(DownloadExport)
            .with_table(Audit)
    }

    /// Requests a temporary storage root that lives as long as the test context.
    pub fn with_storage(mut self) -> Self {
        self.storage = true;
        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError)` - Failed to connect, create tables or create the storage root
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        if self.storage {
            setup.storage()?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
