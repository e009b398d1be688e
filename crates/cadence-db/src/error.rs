use thiserror::Error;

use cadence_core::error::StoreError;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),
}

pub type DbResult<T> = std::result::Result<T, DbError>;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::DatabaseError(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            )) => Self::Duplicate(info.message().to_string()),
            DbError::DatabaseError(e) => Self::Backend(e.to_string()),
            DbError::PoolError(e) => Self::Connection(e.to_string()),
        }
    }
}
