//! # Generic Messages
//!
//! This module defines the message types used for communication between a
//! `ResourceClient` and its `ResourceActor` gateway.

use crate::entity::RestEntity;
use crate::error::ClientError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by gateways.
pub type Response<T> = oneshot::Sender<Result<T, ClientError>>;

/// Request sent to a gateway.
///
/// # The CRUD Pattern
/// The variants map one-to-one onto the five REST operations every resource exposes:
///
/// - **List**: the full collection. No pagination, filtering or sorting.
/// - **Get**: one record by id.
/// - **Create**: the full draft; the reply is the server-assigned record.
/// - **Update**: a partial DTO; the reply is whatever partial the server echoes.
/// - **Delete**: removal by id; no body expected.
///
/// This type is generic over `T: RestEntity`, so a "User Update" payload can never be
/// sent to the product gateway.
#[derive(Debug)]
pub enum ResourceRequest<T: RestEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Create {
        draft: T,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T::Update>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

impl<T: RestEntity> ResourceRequest<T> {
    /// Short operation name used in logs.
    pub fn operation(&self) -> &'static str {
        match self {
            ResourceRequest::List { .. } => "list",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
        }
    }
}
