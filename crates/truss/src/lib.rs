//! truss — contract-driven HTTP/JSON gateway and client generation.
//!
//! Write a service as a plain `impl` block with request/response record
//! types and doc-comment options; `truss` extracts that into a
//! language-neutral [`Model`](truss_core::model::Context), renders a
//! gateway, client proxy, docs, or mock from it, and runs both ends
//! (gateway and client) at request time.
//!
//! Each concern is feature-gated so a binary only pulls in what it
//! actually links against:
//!
//! | Feature | Brings in | Used by |
//! |---|---|---|
//! | `parse` | [`truss_parse`] | anything that extracts a Model from source |
//! | `codegen` | [`truss_codegen`] | template-driven artifact rendering |
//! | `openapi` | [`truss_openapi`] | OpenAPI document composition |
//! | `http` | [`truss_gateway`] | a running gateway |
//! | `client` | [`truss_client`] | a running client proxy |
//!
//! `full` (the default) enables all of them — this crate is most often
//! reached for by the `truss` CLI and by one-off tooling, not by
//! generated code itself, which depends on the narrower runtime crates
//! directly so a deployed service doesn't link `truss-parse`'s `syn`
//! dependency.

pub use truss_core::*;

#[cfg(feature = "parse")]
pub use truss_parse as parse;

#[cfg(feature = "codegen")]
pub use truss_codegen as codegen;

#[cfg(feature = "openapi")]
pub use truss_openapi as openapi;

#[cfg(feature = "http")]
pub use truss_gateway as gateway;

#[cfg(feature = "client")]
pub use truss_client as client;

pub use serde;
pub use serde_json;

/// Convenient imports for a generated artifact or hand-written service.
pub mod prelude {
    pub use truss_core::model::{Context, Function, HttpMethod, Record, Service};
    pub use truss_core::{Authorization, EndpointDescriptor, Metadata, RequestContext, RpcError};

    #[cfg(feature = "http")]
    pub use truss_gateway::{json_response, Endpoint, Gateway, Redirector, Registry};

    #[cfg(feature = "client")]
    pub use truss_client::Client;

    pub use serde::{Deserialize, Serialize};
}
