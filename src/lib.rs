pub mod controllers;
pub mod enums;
pub mod path;
pub mod readonly;
pub mod registry;
pub mod router;
pub mod routes;
pub mod types;

pub use controllers::{
    AppController, AuthController, Controllers, Handler, HandlerError, HandlerKind, HandlerResult,
    UsersController,
};
pub use enums::{HttpMethod, MethodParseError, MethodSet};
pub use readonly::{ReadOnlyError, RouterReadOnly};
pub use router::{Router, RouterError, RouterOptions, RouterOptionsError, RouterResult};
pub use routes::{DispatchError, ROUTES, RouteTable, build, build_with_options};
pub use types::{RouteKey, RouteMatch};
