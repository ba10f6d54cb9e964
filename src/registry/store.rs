use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::registry::{RegistryError, RegistryMetrics, RegistryResult};
use crate::router::{PreprocessOutcome, Preprocessor, RouterOptions};
use crate::types::RouteKey;
use hashbrown::HashMap as FastHashMap;
use hashbrown::HashSet as FastHashSet;
use std::sync::Arc;

// Keys are dense u16 positions, so one slot of the range stays unused
pub const MAX_ROUTES: u16 = u16::MAX;

pub(crate) type StaticMaps = [FastHashMap<Box<str>, RouteKey>; HTTP_METHOD_COUNT];

#[derive(Debug)]
pub struct RouteEntry<H> {
    key: RouteKey,
    method: HttpMethod,
    path: Box<str>,
    original: Box<str>,
    handler: Arc<H>,
}

impl<H> RouteEntry<H> {
    pub fn key(&self) -> RouteKey {
        self.key
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn original_path(&self) -> &str {
        &self.original
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }
}

impl<H> Clone for RouteEntry<H> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            method: self.method,
            path: self.path.clone(),
            original: self.original.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

pub(crate) struct RegistryParts<H> {
    pub(crate) preprocessor: Preprocessor,
    pub(crate) entries: Vec<RouteEntry<H>>,
    pub(crate) static_maps: StaticMaps,
    pub(crate) metrics: RegistryMetrics,
}

#[derive(Debug)]
pub struct RouteRegistry<H> {
    preprocessor: Preprocessor,
    entries: Vec<RouteEntry<H>>,
    static_maps: StaticMaps,
    metrics: RegistryMetrics,
}

impl<H> RouteRegistry<H> {
    pub fn new(options: RouterOptions) -> RegistryResult<Self> {
        Ok(Self {
            preprocessor: Preprocessor::new(options)?,
            entries: Vec::new(),
            static_maps: Default::default(),
            metrics: RegistryMetrics::default(),
        })
    }

    pub fn insert(&mut self, method: HttpMethod, path: &str, handler: H) -> RegistryResult<RouteKey> {
        let outcome = self.preprocessor.apply(path)?;
        if !self.contains(method, outcome.normalized()) {
            self.ensure_capacity(1)?;
        }
        Ok(self.insert_normalized(method, outcome, handler))
    }

    /// Registers every entry or none of them.
    pub fn insert_bulk<I>(&mut self, entries: I) -> RegistryResult<Vec<RouteKey>>
    where
        I: IntoIterator<Item = (HttpMethod, String, H)>,
    {
        let prepared = entries
            .into_iter()
            .map(|(method, path, handler)| Ok((method, self.preprocessor.apply(&path)?, handler)))
            .collect::<RegistryResult<Vec<_>>>()?;

        let fresh = {
            let mut fresh: FastHashSet<(HttpMethod, &str)> = FastHashSet::new();
            for (method, outcome, _) in &prepared {
                if !self.contains(*method, outcome.normalized()) {
                    fresh.insert((*method, outcome.normalized()));
                }
            }
            fresh.len()
        };
        self.ensure_capacity(fresh)?;

        Ok(prepared
            .into_iter()
            .map(|(method, outcome, handler)| self.insert_normalized(method, outcome, handler))
            .collect())
    }

    pub fn contains(&self, method: HttpMethod, normalized: &str) -> bool {
        self.static_maps[method.index()].contains_key(normalized)
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

    pub(crate) fn into_parts(self) -> RegistryParts<H> {
        RegistryParts {
            preprocessor: self.preprocessor,
            entries: self.entries,
            static_maps: self.static_maps,
            metrics: self.metrics,
        }
    }

    fn ensure_capacity(&self, requested: usize) -> RegistryResult<()> {
        if self.entries.len() + requested > MAX_ROUTES as usize {
            return Err(RegistryError::MaxRoutesExceeded {
                requested,
                registered: self.entries.len(),
                limit: MAX_ROUTES,
            });
        }
        Ok(())
    }

    fn insert_normalized(
        &mut self,
        method: HttpMethod,
        outcome: PreprocessOutcome,
        handler: H,
    ) -> RouteKey {
        let map = &mut self.static_maps[method.index()];

        if let Some(&key) = map.get(outcome.normalized()) {
            let entry = &mut self.entries[key as usize];
            tracing::warn!(
                method = %method,
                path = %outcome.original(),
                previous = %entry.original,
                key,
                "route registered twice; replacing handler"
            );
            entry.handler = Arc::new(handler);
            entry.original = outcome.original().into();
            self.metrics.record_replace();
            return key;
        }

        let key = self.entries.len() as RouteKey;
        tracing::event!(
            tracing::Level::TRACE,
            operation = "insert",
            method = %method,
            path = %outcome.normalized(),
            key
        );

        let original: Box<str> = outcome.original().into();
        let path = outcome.into_normalized().into_boxed_str();
        map.insert(path.clone(), key);
        self.entries.push(RouteEntry {
            key,
            method,
            path,
            original,
            handler: Arc::new(handler),
        });
        self.metrics.record_insert();
        key
    }
}
