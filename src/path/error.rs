use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path must start with '/': {input}")]
    MissingLeadingSlash { input: String },
    #[error("path contains non-ASCII characters: {input}")]
    NonAscii { input: String },
    #[error("path contains control or whitespace byte {byte} in '{input}'")]
    ControlOrWhitespace { input: String, byte: u8 },
    #[error("path contains disallowed character '{character}' (byte {byte}) in '{input}'")]
    DisallowedCharacter {
        input: String,
        character: char,
        byte: u8,
    },
    #[error("invalid percent encoding at index {index} in '{input}'")]
    InvalidPercentEncoding { input: String, index: usize },
    #[error("path '{input}' normalizes to invalid parent traversal '{normalized}'")]
    InvalidParentTraversal { input: String, normalized: String },
}

pub type PathResult<T> = Result<T, PathError>;
