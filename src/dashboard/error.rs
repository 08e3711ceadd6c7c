use crate::storage::StorageError;
use resource_framework::ClientError;
use thiserror::Error;

/// Dashboard call failures, worded for the operator.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The backend rejected the session. It has already been cleared locally; the
    /// caller should send the operator to the login screen.
    #[error("Session expired. Please sign in again.")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error. Please try again later.")]
    Server,

    #[error("Error Code: {0}")]
    Status(u16),

    #[error("Error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DashboardError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DashboardError::Unauthorized)
    }
}

impl From<ClientError> for DashboardError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Status { status: 401, .. } => DashboardError::Unauthorized,
            ClientError::Status { status: 403, .. } => DashboardError::Forbidden,
            ClientError::Status { status: 404, .. } => DashboardError::NotFound,
            ClientError::Status { status: 500, .. } => DashboardError::Server,
            ClientError::Status { status, .. } => DashboardError::Status(status),
            ClientError::Decode(message) => DashboardError::Decode(message),
            other => DashboardError::Transport(other.to_string()),
        }
    }
}
