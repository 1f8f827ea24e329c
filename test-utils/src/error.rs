use thiserror::Error;

/// Errors raised while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to the in-memory database or creating tables failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Creating the scratch storage directory failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
