
use crate::controllers::{Controllers, Handler, HandlerError, HandlerKind};
use crate::enums::{HttpMethod, MethodSet};
use crate::readonly::{ReadOnlyError, ReadOnlyResult, RouterReadOnly};
use crate::registry::RouteEntry;
use crate::router::{Router, RouterOptions, RouterResult};
use crate::types::RouteMatch;
use std::sync::Arc;
use thiserror::Error;

pub const ROUTES: [(HttpMethod, &str, HandlerKind); 6] = [
    (HttpMethod::Get, "/status", HandlerKind::GetStatus),
    (HttpMethod::Get, "/stats", HandlerKind::GetStats),
    (HttpMethod::Get, "/connect", HandlerKind::GetConnect),
    (HttpMethod::Get, "/disconnect", HandlerKind::GetDisconnect),
    (HttpMethod::Get, "/users/me", HandlerKind::GetMe),
    (HttpMethod::Post, "/users", HandlerKind::PostNew),
];

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NoRouteMatch(#[from] ReadOnlyError),
    #[error("handler {handler} failed")]
    Handler {
        handler: HandlerKind,
        #[source]
        source: HandlerError,
    },
}

/// Sealed, shareable table of the API routes. Cloning is cheap.
#[derive(Debug)]
pub struct RouteTable<C> {
    inner: Arc<RouterReadOnly<Handler<C>>>,
}

impl<C> Clone for RouteTable<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub fn build<C>(controllers: Controllers<C>) -> RouteTable<C> {
    // default options carry no mount path and every binding is a valid literal
    build_with_options(controllers, RouterOptions::default())
        .expect("static route bindings always register")
}

pub fn build_with_options<C>(
    controllers: Controllers<C>,
    options: RouterOptions,
) -> RouterResult<RouteTable<C>> {
    let controllers = Arc::new(controllers);
    let router = Router::new(Some(options))?;

    router.add_bulk(ROUTES.iter().map(|&(method, path, kind)| {
        (
            method,
            path.to_string(),
            Handler::new(kind, Arc::clone(&controllers)),
        )
    }))?;
    router.seal();

    let inner = router.get_readonly()?;
    tracing::debug!(
        routes = inner.len(),
        mount = inner.mount_path().unwrap_or("/"),
        "route table built"
    );
    Ok(RouteTable { inner })
}

impl<C> RouteTable<C> {
    pub fn find(&self, method: HttpMethod, path: &str) -> ReadOnlyResult<RouteMatch<Handler<C>>> {
        self.inner.find(method, path)
    }

    pub fn find_str(&self, method: &str, path: &str) -> ReadOnlyResult<RouteMatch<Handler<C>>> {
        self.inner.find_str(method, path)
    }

    /// Looks up the route and runs its handler against `ctx`.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        ctx: &mut C,
    ) -> Result<HandlerKind, DispatchError> {
        let matched = self.find(method, path)?;
        let kind = matched.handler().kind();

        tracing::trace!(handler = %kind, method = %method, path = %path, "dispatching");
        matched
            .handler()
            .invoke(ctx)
            .map_err(|source| DispatchError::Handler {
                handler: kind,
                source,
            })?;
        Ok(kind)
    }

    pub fn allowed_methods(&self, path: &str) -> MethodSet {
        self.inner.allowed_methods(path)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry<Handler<C>>> {
        self.inner.routes()
    }

    pub fn readonly(&self) -> &RouterReadOnly<Handler<C>> {
        &self.inner
    }
}
