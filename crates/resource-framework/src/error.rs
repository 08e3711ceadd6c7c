//! # Client Errors
//!
//! This module defines the error type surfaced by resource clients, gateways and
//! transports. Errors are passed through unchanged; turning them into something a
//! person should read is the job of whoever issued the call.

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Gateway closed")]
    GatewayClosed,
    #[error("Gateway dropped response channel")]
    GatewayDropped,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status code, when the failure came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for `401 Unauthorized` responses.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
