use thiserror::Error;

pub mod database;

pub use database::DatabaseError;

/// Internal error type for store operations
///
/// Not exposed via API - endpoints must convert to ItemError at the
/// boundary.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }
}
