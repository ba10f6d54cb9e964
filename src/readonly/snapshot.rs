use crate::enums::{HttpMethod, MethodSet};
use crate::registry::{RegistryMetrics, RouteEntry, RouteRegistry, StaticMaps};
use crate::router::Preprocessor;
use crate::types::{RouteKey, RouteMatch};

use super::{ReadOnlyError, ReadOnlyResult};

/// Sealed route table; `Send + Sync` whenever the handler type is.
#[derive(Debug)]
pub struct RouterReadOnly<H> {
    entries: Vec<RouteEntry<H>>,
    static_maps: StaticMaps,
    preprocessor: Preprocessor,
    metrics: RegistryMetrics,
    head_falls_back_to_get: bool,
    debug: bool,
}

impl<H> RouterReadOnly<H> {
    pub fn from_registry(registry: RouteRegistry<H>) -> Self {
        let parts = registry.into_parts();
        let options = parts.preprocessor.config();
        let head_falls_back_to_get = options.head_falls_back_to_get;
        let debug = options.debug;

        RouterReadOnly {
            entries: parts.entries,
            static_maps: parts.static_maps,
            preprocessor: parts.preprocessor,
            metrics: parts.metrics,
            head_falls_back_to_get,
            debug,
        }
    }

    fn find_static_normalized(&self, method: HttpMethod, normalized: &str) -> Option<RouteKey> {
        self.static_maps[method.index()].get(normalized).copied()
    }

    fn route_match(&self, key: RouteKey) -> RouteMatch<H> {
        let entry = &self.entries[key as usize];
        RouteMatch {
            key,
            method: entry.method(),
            handler: entry.handler().clone(),
        }
    }

    fn miss(&self, method: &str, path: &str, reason: &'static str) -> ReadOnlyError {
        if self.debug {
            tracing::event!(
                tracing::Level::DEBUG,
                method = %method,
                path = %path,
                reason,
                "no route matched"
            );
        }
        ReadOnlyError::NoRouteMatch {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    #[tracing::instrument(level = "trace", skip(self, path), fields(method = %method, path = %path))]
    pub fn find(&self, method: HttpMethod, path: &str) -> ReadOnlyResult<RouteMatch<H>> {
        tracing::event!(tracing::Level::TRACE, operation = "find", method = %method, path = %path);

        let normalized = match self.preprocessor.resolve_request(path) {
            Ok(Some(normalized)) => normalized,
            Ok(None) => return Err(self.miss(method.as_str(), path, "outside mount path")),
            Err(err) => {
                if self.debug {
                    tracing::event!(tracing::Level::DEBUG, error = %err, "request path rejected");
                }
                return Err(self.miss(method.as_str(), path, "invalid path"));
            }
        };

        if let Some(key) = self.find_static_normalized(method, &normalized) {
            return Ok(self.route_match(key));
        }

        if method == HttpMethod::Head
            && self.head_falls_back_to_get
            && let Some(key) = self.find_static_normalized(HttpMethod::Get, &normalized)
        {
            return Ok(self.route_match(key));
        }

        Err(self.miss(method.as_str(), path, "not registered"))
    }

    /// Unsupported method tokens never match.
    pub fn find_str(&self, method: &str, path: &str) -> ReadOnlyResult<RouteMatch<H>> {
        match method.parse::<HttpMethod>() {
            Ok(method) => self.find(method, path),
            Err(_) => Err(self.miss(method, path, "unsupported method")),
        }
    }

    /// Methods registered for `path`, suitable for an `Allow` header.
    pub fn allowed_methods(&self, path: &str) -> MethodSet {
        let Ok(Some(normalized)) = self.preprocessor.resolve_request(path) else {
            return MethodSet::empty();
        };

        let mut allowed = HttpMethod::ALL
            .into_iter()
            .filter(|method| self.find_static_normalized(*method, &normalized).is_some())
            .fold(MethodSet::empty(), |set, method| set | method.mask());

        if self.head_falls_back_to_get && allowed.contains(MethodSet::GET) {
            allowed |= MethodSet::HEAD;
        }
        allowed
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    pub fn mount_path(&self) -> Option<&str> {
        self.preprocessor.mount()
    }
}

impl<H> Clone for RouterReadOnly<H> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            static_maps: self.static_maps.clone(),
            preprocessor: self.preprocessor.clone(),
            metrics: self.metrics.clone(),
            head_falls_back_to_get: self.head_falls_back_to_get,
            debug: self.debug,
        }
    }
}
