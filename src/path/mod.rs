mod error;

pub use error::{PathError, PathResult};
