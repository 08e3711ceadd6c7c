//! Errors surfaced while starting or stopping the console.

use crate::config::ConfigError;
use crate::storage::StorageError;
use resource_framework::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Backend client error: {0}")]
    Client(#[from] ClientError),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
