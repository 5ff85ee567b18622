use thiserror::Error;
use truss_core::RpcError;

/// Gateway transport errors: failures that happen below the handler,
/// in the routing/restoration machinery itself, as distinct from a
/// [`truss_core::RpcError`] a handler returns deliberately.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("method '{method}' is not allowed on '{path}'")]
    MethodNotAllowed { method: String, path: String },

    #[error("handler for '{function}' panicked: {message}")]
    HandlerPanic { function: String, message: String },
}

impl From<GatewayError> for RpcError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MethodNotAllowed { .. } => RpcError::new(405, err.to_string()),
            GatewayError::HandlerPanic { .. } => RpcError::internal(err.to_string()),
        }
    }
}
