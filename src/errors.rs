use diesel::result::Error as DieselError;
use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the holdings tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Holdings retrieval failed: {0}")]
    Retrieval(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid fund registry: {0}")]
    InvalidRegistry(String),

    #[error("Unknown fund: {0}")]
    UnknownFund(String),
}

impl From<DieselError> for Error {
    fn from(error: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(error))
    }
}

impl From<r2d2::Error> for Error {
    fn from(error: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(error))
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Unexpected(error.to_string())
    }
}
