//! The endpoint descriptor a generated `register_*` function builds per
//! function and hands to [`crate::Registry::add`].

use truss_core::context::EndpointDescriptor;
use truss_core::model::HttpMethod;

/// A registered route: which service/function it serves, the HTTP
/// method and path it answers to, and the status used on success.
///
/// `path` is always the function's own path (never prefixed) so that
/// [`crate::Registry::endpoints`] reports a prefix-independent view —
/// endpoints retain their unprefixed path in their descriptor so
/// introspection stays independent of how the gateway is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub service: String,
    pub function: String,
    pub method: HttpMethod,
    pub path: String,
    pub success_status: u16,
}

impl Endpoint {
    /// The descriptor form stashed on the [`truss_core::RequestContext`]
    /// for the duration of the request.
    pub fn descriptor(&self) -> EndpointDescriptor {
        EndpointDescriptor {
            service: self.service.clone(),
            function: self.function.clone(),
            method: self.method.as_str().to_string(),
            path: self.path.clone(),
        }
    }
}
