mod error;
pub mod snapshot;

pub use error::{ReadOnlyError, ReadOnlyResult};
pub use snapshot::RouterReadOnly;
