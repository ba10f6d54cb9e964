use std::error::Error as StdError;
use thiserror::Error;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Failure raised by a controller. Opaque to the route table.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl HandlerError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxedSource>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type HandlerResult = Result<(), HandlerError>;
