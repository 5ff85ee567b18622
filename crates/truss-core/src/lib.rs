//! Shared vocabulary for every `truss` crate: the contract [`model`], the
//! [`context`] carried through a request, [`metadata`] and
//! [`authorization`] propagation, [`naming`] helpers, and the
//! status-coded [`error::RpcError`].

pub mod authorization;
pub mod context;
pub mod error;
pub mod metadata;
pub mod model;
pub mod naming;

pub use authorization::Authorization;
pub use context::{EndpointDescriptor, RequestContext};
pub use error::RpcError;
pub use metadata::Metadata;
