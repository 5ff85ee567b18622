//! The user-middleware half of the pipeline.
//!
//! A [`Middleware`] observes or rewrites the [`RequestContext`] before
//! calling its continuation, and can run further code after the
//! continuation resolves — the same "onion" shape tower/axum middleware
//! takes, specialized to the context rather than the raw HTTP request
//! since the router, binder, and endpoint injection already ran by the
//! time user middleware sees the call (stage 5 runs after stages 2-4).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::response::Response;
use truss_core::RequestContext;

/// The rest of the pipeline, from this middleware's point of view:
/// calling it runs every later middleware and finally the handler.
pub type Next = Box<dyn FnOnce(RequestContext) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send>;

/// A single pipeline stage. Registered via [`crate::Registry::use_middleware`]
/// in the order it should run.
pub type Middleware =
    Arc<dyn Fn(RequestContext, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Fold `middlewares` (in registration order) around `handler`, so that
/// invoking the result runs middleware 0 first, which runs middleware 1,
/// ..., which finally runs `handler` — and any code a stage schedules
/// after its `next(ctx).await` call unwinds in the reverse order.
pub fn chain(middlewares: &[Middleware], handler: Next) -> Next {
    middlewares.iter().rev().fold(handler, |next, middleware| {
        let middleware = middleware.clone();
        let wrapped: Next = Box::new(move |ctx: RequestContext| middleware(ctx, next));
        wrapped
    })
}
