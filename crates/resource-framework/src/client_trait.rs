//! # ResourceApi Trait
//!
//! Provides a common interface for resource‑specific clients. Implementors only expose
//! their inner `ResourceClient`; the five operations come for free. Screens are written
//! against this trait, so a `UserClient`, a bare `ResourceClient<User>` or a mock all
//! plug into the same code.
use crate::{ClientError, ResourceClient, RestEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard CRUD operations.
///
/// # Example
///
/// ```rust
/// use resource_framework::{ResourceApi, ResourceClient, RestEntity};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// struct Tag { id: Option<u64>, label: String }
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct TagUpdate { label: Option<String> }
///
/// impl RestEntity for Tag {
///     type Id = u64;
///     type Update = TagUpdate;
///     const RESOURCE: &'static str = "tag";
///     fn id(&self) -> Option<&u64> { self.id.as_ref() }
///     fn to_update(&self) -> TagUpdate { TagUpdate { label: Some(self.label.clone()) } }
/// }
///
/// #[derive(Clone)]
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// impl ResourceApi<Tag> for TagClient {
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
/// }
///
/// async fn usage(client: TagClient) {
///     // list(), get(), create(), update() and delete() are provided automatically!
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ResourceApi<T: RestEntity>: Clone + Send + Sync + 'static {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch the full collection.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, ClientError> {
        tracing::debug!("Sending request");
        self.inner().list().await
    }

    /// Fetch one record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<T, ClientError> {
        tracing::debug!("Sending request");
        self.inner().get(id).await
    }

    /// Send a draft; returns the record with its server-assigned id.
    #[tracing::instrument(skip(self, draft))]
    async fn create(&self, draft: T) -> Result<T, ClientError> {
        tracing::debug!("Sending request");
        self.inner().create(draft).await
    }

    /// Send only the supplied fields of a record.
    #[tracing::instrument(skip(self, update))]
    async fn update(&self, id: T::Id, update: T::Update) -> Result<T::Update, ClientError> {
        tracing::debug!("Sending request");
        self.inner().update(id, update).await
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), ClientError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }
}

impl<T: RestEntity> ResourceApi<T> for ResourceClient<T> {
    fn inner(&self) -> &ResourceClient<T> {
        self
    }
}
