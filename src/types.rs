use crate::enums::HttpMethod;
use std::sync::Arc;

pub type RouteKey = u16;

/// `method` is `GET` when a `HEAD` request fell back to the `GET` route.
#[derive(Debug)]
pub struct RouteMatch<H> {
    pub key: RouteKey,
    pub method: HttpMethod,
    pub handler: Arc<H>,
}

impl<H> RouteMatch<H> {
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            method: self.method,
            handler: Arc::clone(&self.handler),
        }
    }
}
