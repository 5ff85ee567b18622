//! The per-request context carried through the gateway's middleware
//! pipeline and restored on the client side of a call.

use tokio_util::sync::CancellationToken;

use crate::authorization::Authorization;
use crate::metadata::Metadata;

/// Identifies which endpoint is currently being served, so middleware and
/// the introspection route can report on it without re-parsing the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub service: String,
    pub function: String,
    pub method: String,
    pub path: String,
}

/// Everything a handler or client-side middleware stage needs about the
/// request in flight: propagated [`Metadata`], the caller's
/// [`Authorization`], which endpoint is being served, and a cancellation
/// signal the caller can trip to abandon the call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    metadata: Metadata,
    authorization: Authorization,
    endpoint: Option<EndpointDescriptor>,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            authorization: Authorization::none(),
            endpoint: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn authorization(&self) -> &Authorization {
        &self.authorization
    }

    pub fn endpoint(&self) -> Option<&EndpointDescriptor> {
        self.endpoint.as_ref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Return a context with `metadata` replacing the current bag. Used
    /// by the gateway's metadata-restoration middleware stage.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_authorization(mut self, authorization: Authorization) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_compose() {
        let ctx = RequestContext::new()
            .with_metadata(Metadata::new().with("tenant", "acme"))
            .with_authorization(Authorization::from_header(Some("Bearer t")))
            .with_endpoint(EndpointDescriptor {
                service: "Pricing".into(),
                function: "GetQuote".into(),
                method: "GET".into(),
                path: "/Pricing.GetQuote".into(),
            });

        assert_eq!(ctx.metadata().get::<String>("tenant").as_deref(), Some("acme"));
        assert!(ctx.authorization().is_present());
        assert_eq!(ctx.endpoint().unwrap().function, "GetQuote");
    }

    #[test]
    fn fresh_context_has_no_authorization_or_endpoint() {
        let ctx = RequestContext::new();
        assert!(!ctx.authorization().is_present());
        assert!(ctx.endpoint().is_none());
        assert!(ctx.metadata().is_empty());
    }
}
