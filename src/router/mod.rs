mod errors;
mod options;
mod preprocess;
mod service;

pub use crate::readonly::RouterReadOnly;
pub use errors::{RouterError, RouterResult};
pub use options::{RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use preprocess::{PreprocessOutcome, Preprocessor};
pub use service::Router;
