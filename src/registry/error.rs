use crate::path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("maximum number of routes exceeded: requested {requested}, registered {registered}, limit {limit}")]
    MaxRoutesExceeded {
        requested: usize,
        registered: usize,
        limit: u16,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
