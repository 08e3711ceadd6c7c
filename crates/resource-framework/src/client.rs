//! # Generic Client
//!
//! This module defines the generic client for communicating with gateways.

use crate::entity::RestEntity;
use crate::error::ClientError;
use crate::message::{ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type‑safe, async API for the five REST operations of
/// one resource. It forwards requests to a `ResourceActor<T>` over a Tokio mpsc channel and
/// returns results via oneshot channels.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Single-shot** – every call issues exactly one request; nothing is retried or cached.
/// * **Transparent errors** – failures come back exactly as the gateway produced them.
#[derive(Clone)]
pub struct ResourceClient<T: RestEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: RestEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, ClientError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ClientError::GatewayClosed)?;
        response.await.map_err(|_| ClientError::GatewayDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, ClientError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn create(&self, draft: T) -> Result<T, ClientError> {
        self.request(|respond_to| ResourceRequest::Create { draft, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T::Update, ClientError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ClientError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
