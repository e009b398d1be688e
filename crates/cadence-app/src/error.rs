use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] cadence_service::error::ServiceError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
