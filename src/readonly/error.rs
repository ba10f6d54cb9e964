use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadOnlyError {
    #[error("no route matched for method {method} and path '{path}'")]
    NoRouteMatch { method: String, path: String },
}

pub type ReadOnlyResult<T> = Result<T, ReadOnlyError>;
