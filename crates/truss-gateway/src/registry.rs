//! The router: accumulates [`Endpoint`]s and their handlers, then builds
//! a servable [`Gateway`], composing the registration and pipeline
//! stages into one `axum::Router`.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::routing::{delete, get, head, patch, post, put, MethodRouter};
use axum::Router;
use bytes::Bytes;
use tower_http::catch_panic::CatchPanicLayer;
use truss_core::metadata::METADATA_HEADER;
use truss_core::model::HttpMethod;
use truss_core::{Authorization, Metadata, RequestContext};

use crate::endpoint::Endpoint;
use crate::error::GatewayError;
use crate::middleware::{chain, Middleware, Next};
use crate::request::IncomingRequest;
use crate::response::error_response;

/// The future a handler closure returns.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response, truss_core::RpcError>> + Send>>;

/// A generated `register_*` function supplies one of these per endpoint:
/// given the service implementation, the restored context, and the
/// bound request, run the operation and encode its response.
pub type HandlerFn<S> = Box<dyn Fn(Arc<S>, RequestContext, IncomingRequest) -> HandlerFuture + Send + Sync>;

/// Accumulates endpoints and middleware for one service implementation,
/// then assembles them into a [`Gateway`]. `S` is the concrete service
/// type (the generated `impl` of the service trait), not a trait object
/// — the registry never needs `dyn` dispatch since it is built once, for
/// one known implementation, at startup.
pub struct Registry<S> {
    prefix: Option<String>,
    entries: Vec<(Endpoint, HandlerFn<S>)>,
    options_paths: HashSet<String>,
    middlewares: Vec<Middleware>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self {
            prefix: None,
            entries: Vec::new(),
            options_paths: HashSet::new(),
            middlewares: Vec::new(),
        }
    }
}

impl<S: Send + Sync + 'static> Registry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount every endpoint this registry builds under `prefix`. The
    /// prefix is applied once, at `build` time — [`Endpoint::path`]
    /// itself stays unprefixed.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Register a pipeline stage. Stages run in registration order.
    pub fn use_middleware<F>(&mut self, middleware: F)
    where
        F: Fn(RequestContext, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
    }

    /// Register one endpoint and its handler. A generated
    /// `register_<service>` function calls this once per function on
    /// the service.
    pub fn add<F>(&mut self, endpoint: Endpoint, handler: F)
    where
        F: Fn(Arc<S>, RequestContext, IncomingRequest) -> HandlerFuture + Send + Sync + 'static,
    {
        // De-duplicate OPTIONS routes with a HashSet membership check up
        // front rather than installing one per endpoint and discarding the
        // "route already exists" error each subsequent add would cause.
        self.options_paths.insert(endpoint.path.clone());
        self.entries.push((endpoint, Box::new(handler)));
    }

    /// Every endpoint registered so far, in their unprefixed form.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.entries.iter().map(|(e, _)| e.clone()).collect()
    }

    /// Assemble the registered endpoints, prefix, and middleware
    /// pipeline into a servable [`Gateway`] bound to `service`.
    pub fn build(self, service: S) -> Gateway {
        let service = Arc::new(service);
        let middlewares: Arc<Vec<Middleware>> = Arc::new(self.middlewares);
        let endpoints: Vec<Endpoint> = self.entries.iter().map(|(e, _)| e.clone()).collect();

        let mut per_path: HashMap<String, MethodRouter> = HashMap::new();
        for (endpoint, handler) in self.entries {
            let state = RouteState {
                service: service.clone(),
                handler: Arc::new(handler),
                endpoint: endpoint.clone(),
                middlewares: middlewares.clone(),
            };
            let method_router = build_method_router(endpoint.method, state);
            // Two endpoints can share a path with different HTTP methods
            // (e.g. GET and PUT on the same resource) — merge their
            // `MethodRouter`s instead of registering the path twice,
            // which axum rejects.
            match per_path.remove(&endpoint.path) {
                Some(existing) => {
                    per_path.insert(endpoint.path.clone(), existing.merge(method_router));
                }
                None => {
                    per_path.insert(endpoint.path.clone(), method_router);
                }
            }
        }

        for path in &self.options_paths {
            if let Some(existing) = per_path.remove(path) {
                per_path.insert(path.clone(), existing.options(options_not_allowed));
            }
        }

        let mut router = Router::new();
        for (path, method_router) in per_path {
            router = router.route(&truss_core::naming::colon_to_braces(&path), method_router);
        }

        if let Some(prefix) = self.prefix.filter(|p| !p.is_empty()) {
            router = Router::new().nest(&prefix, router);
        }

        router = router.layer(CatchPanicLayer::custom(panic_handler));

        Gateway { router, endpoints }
    }
}

/// The state captured by each route's closure. `Clone` because the
/// extractor-based handler axum wants is `Fn`, not `FnOnce`, so the
/// closure built in [`build_method_router`] must be able to re-capture
/// its state per call.
struct RouteState<S> {
    service: Arc<S>,
    handler: Arc<HandlerFn<S>>,
    endpoint: Endpoint,
    middlewares: Arc<Vec<Middleware>>,
}

impl<S> Clone for RouteState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            handler: self.handler.clone(),
            endpoint: self.endpoint.clone(),
            middlewares: self.middlewares.clone(),
        }
    }
}

fn build_method_router<S: Send + Sync + 'static>(method: HttpMethod, state: RouteState<S>) -> MethodRouter {
    let dispatcher = move |req_method: Method,
                            headers: HeaderMap,
                            Path(path_params): Path<HashMap<String, String>>,
                            RawQuery(query): RawQuery,
                            body: Bytes| {
        let state = state.clone();
        async move { dispatch(state, req_method, headers, path_params, query, body).await }
    };
    match method {
        HttpMethod::Get => get(dispatcher),
        HttpMethod::Put => put(dispatcher),
        HttpMethod::Post => post(dispatcher),
        HttpMethod::Patch => patch(dispatcher),
        HttpMethod::Delete => delete(dispatcher),
        HttpMethod::Head => head(dispatcher),
    }
}

/// Restores metadata and authorization from headers, stashes the
/// endpoint descriptor, runs the middleware chain, and falls back to
/// the error encoding if the handler (or a middleware stage) returns an
/// `Err`.
async fn dispatch<S: Send + Sync + 'static>(
    state: RouteState<S>,
    req_method: Method,
    headers: HeaderMap,
    path_params: HashMap<String, String>,
    query_raw: Option<String>,
    body: Bytes,
) -> Response {
    let metadata = headers
        .get(METADATA_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(Metadata::from_header_value)
        .unwrap_or_default();
    let authorization = Authorization::from_header(
        headers
            .get(truss_core::authorization::AUTHORIZATION_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let ctx = RequestContext::new()
        .with_metadata(metadata)
        .with_authorization(authorization)
        .with_endpoint(state.endpoint.descriptor());

    let http_method = HttpMethod::from_str_opt(req_method.as_str()).unwrap_or(HttpMethod::Post);
    let query_pairs: Vec<(String, String)> = query_raw
        .as_deref()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let request = IncomingRequest::new(http_method, body, query_pairs, path_params);

    let service = state.service.clone();
    let handler = state.handler.clone();
    let function = state.endpoint.function.clone();
    let terminus: Next = Box::new(move |ctx: RequestContext| {
        Box::pin(async move {
            match handler(service, ctx, request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(function = %function, status = err.status, message = %err.message, "handler returned an error");
                    error_response(&err)
                }
            }
        })
    });

    let pipeline = chain(&state.middlewares, terminus);
    pipeline(ctx).await
}

async fn options_not_allowed(method: Method, uri: axum::http::Uri) -> Response {
    error_response(
        &GatewayError::MethodNotAllowed {
            method: method.to_string(),
            path: uri.path().to_string(),
        }
        .into(),
    )
}

fn panic_handler(err: Box<dyn std::any::Any + Send>) -> Response {
    let message = panic_message(&err);
    tracing::error!(message = %message, "handler panicked");
    error_response(
        &GatewayError::HandlerPanic {
            function: "unknown".to_string(),
            message,
        }
        .into(),
    )
}

fn panic_message(err: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked with a non-string payload".to_string()
    }
}

/// A built, servable gateway: an [`axum::Router`] plus the endpoint list
/// it was built from, for introspection.
pub struct Gateway {
    router: Router,
    endpoints: Vec<Endpoint>,
}

impl Gateway {
    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Merge another gateway's routes into this one, for serving
    /// multiple services (each built with its own [`Registry`] and
    /// prefix) from a single listener.
    pub fn merge(mut self, other: Gateway) -> Self {
        self.router = self.router.merge(other.router);
        self.endpoints.extend(other.endpoints);
        self
    }
}

