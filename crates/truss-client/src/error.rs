use thiserror::Error;
use truss_core::RpcError;

/// Everything that can go wrong making a call through a generated client
/// proxy.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response: connection refused, DNS,
    /// TLS, or another transport-level failure. The underlying cause's
    /// message is preserved, and no retry is attempted at this layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response came back with status ≥ 400. `status` and `message`
    /// are recovered from the body per the response-decoding rules.
    #[error("{status} {message}")]
    Remote { status: u16, message: String },

    /// The request record failed to serialize to JSON.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The caller's `RequestContext` cancellation token fired before a
    /// response arrived.
    #[error("request was cancelled")]
    Cancelled,
}

impl ClientError {
    /// The HTTP status every variant carries, mirrored from the same
    /// mapping `From<ClientError> for RpcError` uses: a mapped remote
    /// error keeps its own status, a cancellation reads as a timeout, and
    /// transport/encode failures that never reached a server read as an
    /// internal error, so a caller can switch on the status without first
    /// converting to `RpcError`.
    pub fn status(&self) -> u16 {
        match self {
            ClientError::Remote { status, .. } => *status,
            ClientError::Cancelled => 408,
            ClientError::Transport(_) | ClientError::Encode(_) => 500,
        }
    }
}

impl From<ClientError> for RpcError {
    fn from(err: ClientError) -> Self {
        let status = err.status();
        match err {
            ClientError::Remote { message, .. } => RpcError::new(status, message),
            other => RpcError::new(status, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_preserves_its_own_status() {
        let err = ClientError::Remote {
            status: 404,
            message: "no such widget".into(),
        };
        assert_eq!(err.status(), 404);
        let rpc: RpcError = err.into();
        assert_eq!(rpc.status, 404);
        assert_eq!(rpc.message, "no such widget");
    }

    #[test]
    fn cancellation_reads_as_a_timeout() {
        assert_eq!(ClientError::Cancelled.status(), 408);
    }

    #[test]
    fn transport_and_encode_failures_read_as_internal_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ClientError::Encode(json_err);
        assert_eq!(err.status(), 500);
    }
}
