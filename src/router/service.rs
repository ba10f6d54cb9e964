use crate::enums::HttpMethod;
use crate::readonly::RouterReadOnly;
use crate::registry::RouteRegistry;
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::types::{RouteKey, RouteMatch};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::OnceLock;

#[derive(Debug)]
struct RouterState<H> {
    // taken by `seal`
    registry: Option<RouteRegistry<H>>,
    readonly: OnceLock<Arc<RouterReadOnly<H>>>,
}

/// Open for `add` until [`seal`](Router::seal), then read-only.
#[derive(Debug)]
pub struct Router<H> {
    inner: RwLock<RouterState<H>>,
}

impl<H> Router<H> {
    pub fn new(options: Option<RouterOptions>) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let registry = RouteRegistry::new(options)?;

        Ok(Self {
            inner: RwLock::new(RouterState {
                registry: Some(registry),
                readonly: OnceLock::new(),
            }),
        })
    }

    pub fn add(&self, method: HttpMethod, path: &str, handler: H) -> RouterResult<RouteKey> {
        let mut guard = self.inner.write();

        let Some(registry) = guard.registry.as_mut() else {
            return Err(RouterError::AddWhileSealed {
                path: path.to_string(),
            });
        };

        let key = registry.insert(method, path, handler)?;
        tracing::debug!(method = %method, path = %path, key, "route added");
        Ok(key)
    }

    pub fn add_bulk<I>(&self, entries: I) -> RouterResult<Vec<RouteKey>>
    where
        I: IntoIterator<Item = (HttpMethod, String, H)>,
    {
        let mut guard = self.inner.write();

        let Some(registry) = guard.registry.as_mut() else {
            return Err(RouterError::BulkAddWhileSealed {
                count: entries.into_iter().count(),
            });
        };

        let keys = registry.insert_bulk(entries)?;
        tracing::debug!(count = keys.len(), "routes added in bulk");
        Ok(keys)
    }

    /// Sealing twice is a no-op.
    pub fn seal(&self) {
        let mut guard = self.inner.write();

        let Some(registry) = guard.registry.take() else {
            return;
        };

        let snapshot = RouterReadOnly::from_registry(registry);
        tracing::debug!(routes = snapshot.len(), "router sealed");
        // the registry was just taken, so the cell is still empty
        let stored = guard.readonly.set(Arc::new(snapshot));
        debug_assert!(stored.is_ok());
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().readonly.get().is_some()
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> RouterResult<RouteMatch<H>> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => Ok(ro.find(method, path)?),
            None => Err(RouterError::FindWhileMutable),
        }
    }

    pub fn get_readonly(&self) -> RouterResult<Arc<RouterReadOnly<H>>> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => Ok(Arc::clone(ro)),
            None => Err(RouterError::ReadOnlyUnavailable),
        }
    }
}
