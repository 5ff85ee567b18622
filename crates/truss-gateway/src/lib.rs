//! Runtime HTTP gateway: the router, the body/query/path binder, and the
//! middleware pipeline that a generated `register_*` function wires up
//! to dispatch incoming requests to a service implementation.
//!
//! Generated code depends on this crate and [`truss_core`]; it never
//! depends on `axum` directly, so a gateway's transport can evolve
//! without regenerating every service.

mod endpoint;
mod error;
mod middleware;
mod registry;
mod request;
mod response;

pub use endpoint::Endpoint;
pub use error::GatewayError;
pub use middleware::{chain, Middleware, Next};
pub use registry::{Gateway, HandlerFn, HandlerFuture, Registry};
pub use request::{BindingSchema, IncomingRequest};
pub use response::{error_response, json_response, Redirector};
