//! The error taxonomy shared by the gateway and the client.
//!
//! A [`RpcError`] carries its HTTP status as a property of the value
//! itself — never inferred from a string or a type name — so the gateway
//! can translate an arbitrary handler error into a response and the
//! client can translate an arbitrary error response back into the same
//! value shape.

use thiserror::Error;

/// An error produced by a service method, or reconstructed by the client
/// from a non-2xx gateway response.
#[derive(Debug, Error, Clone)]
#[error("{status} {message}")]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(501, message)
    }

    /// Whether this is a client-fault (4xx) error.
    pub fn is_client_fault(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_constructors_set_expected_codes() {
        assert_eq!(RpcError::bad_request("x").status, 400);
        assert_eq!(RpcError::not_found("x").status, 404);
        assert_eq!(RpcError::conflict("x").status, 409);
        assert_eq!(RpcError::internal("x").status, 500);
        assert_eq!(RpcError::not_implemented("x").status, 501);
    }

    #[test]
    fn client_fault_range_is_4xx_only() {
        assert!(RpcError::bad_request("x").is_client_fault());
        assert!(!RpcError::internal("x").is_client_fault());
    }
}
