//! # Resource Framework
//!
//! This crate provides the building blocks for type-safe, concurrent clients of a
//! resource-oriented REST backend. It applies the **Actor Model** to the client side:
//! every resource (User, Product, Order, …) gets a gateway task that owns its endpoint
//! table, and the rest of the program talks to that task through a cloneable handle.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Record Layer** ([`RestEntity`]) - the resource's fields, id and partial-update DTO
//! 2. **Gateway Layer** ([`ResourceActor`]) - turns typed requests into HTTP calls
//! 3. **Interface Layer** ([`ResourceClient`], [`ResourceApi`]) - type-safe async API
//! 4. **Transport Layer** ([`HttpTransport`]) - the only place that touches the network
//!
//! A resource is described **once** as a `RestEntity`; list, get, create, update and
//! delete come from the framework.
//!
//! ## Endpoint convention
//!
//! All resources share one path scheme, built by [`Endpoints`]:
//!
//! ```rust
//! use resource_framework::Endpoints;
//!
//! let product = Endpoints::new("product");
//! assert_eq!(product.list(), "/product/get-all-products");
//! assert_eq!(product.update(&3), "/product/update-product/3");
//! ```
//!
//! ## Transport Injection
//!
//! The transport is passed to [`ResourceActor::run`], not to the constructor. Clients
//! exist as soon as `new()` returns, so they can be handed to screens before the backend
//! is configured, and tests can swap in [`mock::MockTransport`] without touching anything
//! else.
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{Method, ResourceActor, RestEntity};
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct Tag { id: Option<u64>, label: String }
//!
//! impl RestEntity for Tag {
//!     type Id = u64;
//!     type Update = Tag;
//!     const RESOURCE: &'static str = "tag";
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn to_update(&self) -> Tag { self.clone() }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport
//!         .on(Method::Post, "/tag/save-tag")
//!         .reply_json(200, &Tag { id: Some(9), label: "hot".into() });
//!
//!     let (actor, client) = ResourceActor::<Tag>::new(10);
//!     tokio::spawn(actor.run(Arc::new(transport.clone())));
//!
//!     let created = client.create(Tag { id: None, label: "hot".into() }).await.unwrap();
//!     assert_eq!(created.id, Some(9));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each gateway runs in its own Tokio task
//! - Each request runs in its own task inside the gateway, so requests never queue
//!   behind one another
//! - A gateway stops once every client handle has been dropped, after in-flight
//!   requests finish
//!
//! ## Errors
//!
//! Every operation returns [`ClientError`]. Gateways never retry, never cache and never
//! rewrite an error; deciding what a person should read is left to the caller.
//!
//! ## Testing
//!
//! See the [`mock`] module for [`mock::MockClient`], [`mock::MockTransport`] and the raw
//! channel helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod endpoints;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ResourceApi;
pub use endpoints::Endpoints;
pub use entity::RestEntity;
pub use error::ClientError;
pub use message::{ResourceRequest, Response};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, SharedTransport,
};
