mod error;
mod stats;
mod store;

pub use error::{RegistryError, RegistryResult};
pub use stats::RegistryMetrics;
pub(crate) use store::StaticMaps;
pub use store::{MAX_ROUTES, RouteEntry, RouteRegistry};
