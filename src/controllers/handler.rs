use super::{Controllers, HandlerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    GetStatus,
    GetStats,
    GetConnect,
    GetDisconnect,
    GetMe,
    PostNew,
}

impl HandlerKind {
    pub const ALL: [HandlerKind; 6] = [
        HandlerKind::GetStatus,
        HandlerKind::GetStats,
        HandlerKind::GetConnect,
        HandlerKind::GetDisconnect,
        HandlerKind::GetMe,
        HandlerKind::PostNew,
    ];

    /// Stable `controller.method` identifier, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            HandlerKind::GetStatus => "app.get_status",
            HandlerKind::GetStats => "app.get_stats",
            HandlerKind::GetConnect => "auth.get_connect",
            HandlerKind::GetDisconnect => "auth.get_disconnect",
            HandlerKind::GetMe => "users.get_me",
            HandlerKind::PostNew => "users.post_new",
        }
    }

    pub fn capability(self) -> &'static str {
        match self {
            HandlerKind::GetStatus => "report process health",
            HandlerKind::GetStats => "report aggregate counts",
            HandlerKind::GetConnect => "establish an authenticated session",
            HandlerKind::GetDisconnect => "terminate an authenticated session",
            HandlerKind::GetMe => "return the identity of the current session",
            HandlerKind::PostNew => "create a new user record",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Handler<C> {
    kind: HandlerKind,
    controllers: Arc<Controllers<C>>,
}

impl<C> Handler<C> {
    pub fn new(kind: HandlerKind, controllers: Arc<Controllers<C>>) -> Self {
        Self { kind, controllers }
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn invoke(&self, ctx: &mut C) -> HandlerResult {
        let c = &self.controllers;
        match self.kind {
            HandlerKind::GetStatus => c.app.get_status(ctx),
            HandlerKind::GetStats => c.app.get_stats(ctx),
            HandlerKind::GetConnect => c.auth.get_connect(ctx),
            HandlerKind::GetDisconnect => c.auth.get_disconnect(ctx),
            HandlerKind::GetMe => c.users.get_me(ctx),
            HandlerKind::PostNew => c.users.post_new(ctx),
        }
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            controllers: Arc::clone(&self.controllers),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("kind", &self.kind).finish()
    }
}
