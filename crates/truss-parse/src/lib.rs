//! The contract extractor: parses a Rust source file into the Model
//! (`truss_core::model::Context`) consumed by the generator and runtime.

pub mod docopts;
pub mod docs;
pub mod error;
pub mod extract;
pub mod module;
pub mod records;
pub mod services;
pub mod types;

pub use error::ExtractError;
pub use extract::extract;
