//! Controller traits. `C` is the host's request/response context.

mod error;
mod handler;

pub use error::{HandlerError, HandlerResult};
pub use handler::{Handler, HandlerKind};

use std::fmt;
use std::sync::Arc;

pub trait AppController<C>: Send + Sync {
    fn get_status(&self, ctx: &mut C) -> HandlerResult;
    fn get_stats(&self, ctx: &mut C) -> HandlerResult;
}

pub trait AuthController<C>: Send + Sync {
    fn get_connect(&self, ctx: &mut C) -> HandlerResult;
    fn get_disconnect(&self, ctx: &mut C) -> HandlerResult;
}

pub trait UsersController<C>: Send + Sync {
    fn get_me(&self, ctx: &mut C) -> HandlerResult;
    fn post_new(&self, ctx: &mut C) -> HandlerResult;
}

pub struct Controllers<C> {
    pub app: Arc<dyn AppController<C>>,
    pub auth: Arc<dyn AuthController<C>>,
    pub users: Arc<dyn UsersController<C>>,
}

impl<C> Controllers<C> {
    pub fn new<A, U, S>(app: A, auth: U, users: S) -> Self
    where
        A: AppController<C> + 'static,
        U: AuthController<C> + 'static,
        S: UsersController<C> + 'static,
    {
        Self {
            app: Arc::new(app),
            auth: Arc::new(auth),
            users: Arc::new(users),
        }
    }
}

impl<C> Clone for Controllers<C> {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            auth: Arc::clone(&self.auth),
            users: Arc::clone(&self.users),
        }
    }
}

impl<C> fmt::Debug for Controllers<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllers").finish_non_exhaustive()
    }
}
