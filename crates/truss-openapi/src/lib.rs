//! OpenAPI 3 document composition: a generic [`OpenApiBuilder`] for
//! merging documents from multiple sources, and [`from_context::build_document`]
//! for rendering one directly from a parsed contract.

mod builder;
mod error;
pub mod from_context;
pub mod schema;
mod types;

pub use builder::OpenApiBuilder;
pub use error::OpenApiError;
pub use from_context::build_document;
pub use types::*;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;
