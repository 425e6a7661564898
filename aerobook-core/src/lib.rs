pub mod booking;
pub mod filters;
pub mod inventory;
pub mod normalize;
pub mod repository;
pub mod selection;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Flight data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Storage error: {0}")]
    PersistenceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
