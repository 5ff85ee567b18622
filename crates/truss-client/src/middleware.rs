//! The client's round-tripper pipeline: the same onion composition as
//! the gateway's [`truss_gateway::Middleware`] chain, specialized to an
//! outgoing [`reqwest::RequestBuilder`] instead of a
//! [`truss_core::RequestContext`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::{RequestBuilder, Response};

use crate::error::ClientError;

/// The rest of the pipeline, from one stage's point of view: calling it
/// runs every later stage and finally sends the request.
pub type Next = Box<dyn FnOnce(RequestBuilder) -> Pin<Box<dyn Future<Output = Result<Response, ClientError>> + Send>> + Send>;

/// A single round-tripper stage, registered via
/// [`crate::Client::use_middleware`] in the order it should run.
pub type Middleware =
    Arc<dyn Fn(RequestBuilder, Next) -> Pin<Box<dyn Future<Output = Result<Response, ClientError>> + Send>> + Send + Sync>;

/// Fold `middlewares` around `transport`, so invoking the result runs
/// stage 0, which runs stage 1, ..., which finally runs `transport`.
pub fn chain(middlewares: &[Middleware], transport: Next) -> Next {
    middlewares.iter().rev().fold(transport, |next, middleware| {
        let middleware = middleware.clone();
        let wrapped: Next = Box::new(move |builder: RequestBuilder| middleware(builder, next));
        wrapped
    })
}
