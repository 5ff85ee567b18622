//! Runtime HTTP client: the URL builder, header injection, middleware
//! pipeline, and response decoding a generated client proxy depends on.
//! Generated code depends on this crate and [`truss_core`]; it never
//! depends on `reqwest` directly.

mod client;
mod error;
mod middleware;
mod response;
mod url;

pub use client::Client;
pub use error::ClientError;
pub use middleware::{chain, Middleware, Next};
pub use response::decode_response;
pub use url::{query_string, substitute_path_params};
