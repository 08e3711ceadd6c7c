//! # Generic Gateway Actor
//!
//! This module defines the `ResourceActor`, the component that turns typed
//! `ResourceRequest<T>` messages into HTTP calls against one resource's endpoints.

use crate::client::ResourceClient;
use crate::endpoints::Endpoints;
use crate::entity::RestEntity;
use crate::error::ClientError;
use crate::message::ResourceRequest;
use crate::transport::{ApiRequest, SharedTransport};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// ## ResourceActor
///
/// The `ResourceActor<T>` is the *server* side of a resource client. It owns the endpoint
/// table for `T::RESOURCE` and the receiver end of the channel. It holds no record state:
/// the backend is the only source of truth.
///
/// * **Concurrency model**: every request runs in its own task inside a `JoinSet`, so a
///   slow list never delays a delete issued after it. Nothing is queued or serialized.
/// * **Transport injection**: the transport is handed to `run()`, not `new()`, so clients
///   can be created and passed around before the backend is wired in.
/// * **Uniform API**: works with any record that implements `RestEntity`.
///
/// ```rust,no_run
/// use resource_framework::{ReqwestTransport, ResourceActor, RestEntity};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// struct Tag { id: Option<u64>, label: String }
///
/// impl RestEntity for Tag {
///     type Id = u64;
///     type Update = Tag;
///     const RESOURCE: &'static str = "tag";
///     fn id(&self) -> Option<&u64> { self.id.as_ref() }
///     fn to_update(&self) -> Tag { self.clone() }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     // 1. Create
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///
///     // 2. Wire & Run
///     let base = "http://localhost:8080/api".parse().unwrap();
///     let transport = ReqwestTransport::new(base, Duration::from_secs(30)).unwrap();
///     tokio::spawn(actor.run(Arc::new(transport)));
///
///     // 3. Use
///     let _ = client.list().await;
/// }
/// ```
///
/// ## Operations
///
/// * **List**: `GET` the collection path and decode a JSON array.
/// * **Get**: `GET` the by-id path and decode one record.
/// * **Create**: `POST` the draft; decode the server's record (with its new id).
/// * **Update**: `PATCH` the partial DTO; decode whatever the server echoes.
/// * **Delete**: `DELETE` the by-id path; the body is ignored.
///
/// Any non-2xx status becomes [`ClientError::Status`] and is handed back untouched.
pub struct ResourceActor<T: RestEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    endpoints: Endpoints,
}

impl<T: RestEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for space when
    /// it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            endpoints: Endpoints::for_entity::<T>(),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the gateway loop until every client has been dropped, then waits for
    /// requests still in flight.
    pub async fn run(mut self, transport: SharedTransport) {
        let entity_type = T::RESOURCE;
        info!(entity_type, "Gateway started");

        let mut in_flight = JoinSet::new();
        let mut served = 0usize;

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    served += 1;
                    debug!(entity_type, operation = msg.operation(), "Request");
                    in_flight.spawn(dispatch(transport.clone(), self.endpoints.clone(), msg));
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        warn!(entity_type, error = %e, "Request task failed");
                    }
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(entity_type, error = %e, "Request task failed");
            }
        }

        info!(entity_type, served, "Shutdown");
    }
}

async fn dispatch<T: RestEntity>(
    transport: SharedTransport,
    endpoints: Endpoints,
    msg: ResourceRequest<T>,
) {
    let entity_type = T::RESOURCE;
    match msg {
        ResourceRequest::List { respond_to } => {
            let result = async {
                let response = transport
                    .execute(ApiRequest::get(endpoints.list()))
                    .await?
                    .into_result()?;
                response.decode::<Vec<T>>()
            }
            .await;
            match &result {
                Ok(items) => debug!(entity_type, count = items.len(), "Listed"),
                Err(e) => warn!(entity_type, error = %e, "List failed"),
            }
            let _ = respond_to.send(result);
        }
        ResourceRequest::Get { id, respond_to } => {
            let result = async {
                let response = transport
                    .execute(ApiRequest::get(endpoints.get(&id)))
                    .await?
                    .into_result()?;
                response.decode::<T>()
            }
            .await;
            if let Err(e) = &result {
                warn!(entity_type, %id, error = %e, "Get failed");
            }
            let _ = respond_to.send(result);
        }
        ResourceRequest::Create { draft, respond_to } => {
            debug!(entity_type, ?draft, "Create");
            let result = async {
                let request = ApiRequest::post(endpoints.create()).with_json(&draft)?;
                let response = transport.execute(request).await?.into_result()?;
                response.decode::<T>()
            }
            .await;
            match &result {
                Ok(created) => match created.id() {
                    Some(id) => info!(entity_type, %id, "Created"),
                    None => info!(entity_type, "Created"),
                },
                Err(e) => warn!(entity_type, error = %e, "Create failed"),
            }
            let _ = respond_to.send(result);
        }
        ResourceRequest::Update {
            id,
            update,
            respond_to,
        } => {
            debug!(entity_type, %id, ?update, "Update");
            let result = async {
                let request = ApiRequest::patch(endpoints.update(&id)).with_json(&update)?;
                let response = transport.execute(request).await?.into_result()?;
                response.decode::<T::Update>()
            }
            .await;
            match &result {
                Ok(_) => info!(entity_type, %id, "Updated"),
                Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
            }
            let _ = respond_to.send(result);
        }
        ResourceRequest::Delete { id, respond_to } => {
            let result: Result<(), ClientError> = async {
                transport
                    .execute(ApiRequest::delete(endpoints.delete(&id)))
                    .await?
                    .into_result()?;
                Ok(())
            }
            .await;
            match &result {
                Ok(()) => info!(entity_type, %id, "Deleted"),
                Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
            }
            let _ = respond_to.send(result);
        }
    }
}
