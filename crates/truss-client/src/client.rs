//! The runtime client: turns a typed call into an HTTP request against a
//! remote gateway and decodes its response.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use truss_core::metadata::METADATA_HEADER;
use truss_core::model::{normalize_prefix, HttpMethod};
use truss_core::authorization::AUTHORIZATION_HEADER;
use truss_core::RequestContext;

use crate::error::ClientError;
use crate::middleware::{chain, Middleware, Next};
use crate::response::decode_response;
use crate::url::{query_string, substitute_path_params};

/// The round-trip deadline applied to every call unless the caller
/// overrides it with `with_timeout` or supplies its own client via
/// `with_http_client`.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A configured connection to one gateway: base URL, optional path
/// prefix, and the user middleware pipeline every call runs through
/// after the two fixed header-writing stages.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    prefix: String,
    middlewares: Vec<Middleware>,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: build_http_client(DEFAULT_TIMEOUT),
            base_url: base_url.into(),
            prefix: String::new(),
            middlewares: Vec::new(),
        }
    }

    /// Build a `Client` from a caller-supplied `reqwest::Client`, for
    /// callers that need their own connection-pool, TLS configuration, or
    /// timeout.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            prefix: String::new(),
            middlewares: Vec::new(),
        }
    }

    /// Override the default 30-second round-trip deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http_client(timeout);
        self
    }

    /// Mount every call this client makes under `prefix` (the client
    /// side of the gateway's own path prefix).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = normalize_prefix(&prefix.into());
        self
    }

    /// Register a round-tripper stage. Stages run in registration order,
    /// after the fixed metadata/authorization header writes and before
    /// the transport.
    pub fn use_middleware<F>(mut self, middleware: F) -> Self
    where
        F: Fn(RequestBuilder, Next) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, ClientError>> + Send>>
            + Send
            + Sync
            + 'static,
    {
        self.middlewares.push(std::sync::Arc::new(middleware));
        self
    }

    /// Invoke one RPC: build the URL from `path_pattern` and `request`,
    /// run the request through the header and middleware stages, and
    /// decode the response into `Res`.
    pub async fn call<Req, Res>(
        &self,
        method: HttpMethod,
        path_pattern: &str,
        ctx: &RequestContext,
        request: &Req,
    ) -> Result<Res, ClientError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut fields = match serde_json::to_value(request)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let path = substitute_path_params(path_pattern, &mut fields);
        let mut url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            truss_core::naming::join_path(&self.prefix, &path)
        );

        let builder = if method.is_body_carrying() {
            self.http
                .request(to_reqwest_method(method), &url)
                .json(&Value::Object(fields))
        } else {
            if let Some(qs) = query_string(&fields) {
                url.push('?');
                url.push_str(&qs);
            }
            self.http.request(to_reqwest_method(method), &url)
        };

        let response = self.dispatch(ctx, builder).await?;
        decode_response(response).await
    }

    /// Run the fixed header-writing stages, then the user pipeline, then
    /// send the request — racing the send against the context's
    /// cancellation token so the caller's cancellation propagates into
    /// the underlying transport.
    async fn dispatch(&self, ctx: &RequestContext, builder: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let metadata_header = ctx.metadata().to_header_value();
        let write_metadata: Middleware = std::sync::Arc::new(move |builder: RequestBuilder, next: Next| {
            let builder = match &metadata_header {
                Some(value) => builder.header(METADATA_HEADER, value),
                None => builder,
            };
            next(builder)
        });

        let authorization_header = ctx.authorization().as_header_value().map(|v| v.to_string());
        let write_authorization: Middleware = std::sync::Arc::new(move |builder: RequestBuilder, next: Next| {
            let builder = match &authorization_header {
                Some(value) => builder.header(AUTHORIZATION_HEADER, value),
                None => builder,
            };
            next(builder)
        });

        let cancellation = ctx.cancellation().clone();
        let transport: Next = Box::new(move |builder: RequestBuilder| {
            Box::pin(async move {
                tokio::select! {
                    result = builder.send() => result.map_err(ClientError::from),
                    () = cancellation.cancelled() => Err(ClientError::Cancelled),
                }
            })
        });

        let mut stages: Vec<Middleware> = vec![write_metadata, write_authorization];
        stages.extend(self.middlewares.iter().cloned());

        let pipeline = chain(&stages, transport);
        pipeline(builder).await
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("building the reqwest client should never fail from a timeout alone")
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_normalized_like_the_gateway_registry() {
        let client = Client::new("https://api.example.com").with_prefix("v2/");
        assert_eq!(client.prefix, "/v2");
    }

    #[test]
    fn http_method_translation_covers_every_variant() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Head), reqwest::Method::HEAD);
    }

    #[test]
    fn new_and_with_timeout_both_build_a_usable_http_client() {
        let default_client = Client::new("https://api.example.com");
        assert!(!default_client.base_url.is_empty());

        let client = Client::new("https://api.example.com").with_timeout(Duration::from_secs(5));
        assert_eq!(client.base_url, "https://api.example.com");
    }
}
