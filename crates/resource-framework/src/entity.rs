//! # RestEntity Trait
//!
//! The `RestEntity` trait defines the contract that every resource (User, Product, Order, …)
//! must implement to be served by the generic `ResourceActor` gateway. It names the
//! resource segment used to build endpoint paths, the identifier type assigned by the
//! server and the partial-update DTO sent on `PATCH`.
//!
//! # Architecture Note
//! By defining one contract that all resource records satisfy, the gateway, the client
//! and the screens above them are written *once* and reused for every resource.
//! Associated types keep the payloads apart: a `UserUpdate` can never be sent to the
//! product endpoints.
//!
//! # Drafts
//! A record with no id is a *draft*: it exists only in a form and has never been
//! persisted. `Default` produces the empty draft used by "add" forms, and `Clone`
//! produces the shallow copy used by "edit" forms.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource record must implement to be managed through a gateway.
pub trait RestEntity:
    Clone + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Server-assigned identifier. Rendered with `Display` into endpoint paths.
    type Id: Clone
        + Eq
        + Hash
        + Display
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// The partial-update shape: every field optional, only supplied fields are sent.
    type Update: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Resource segment used in endpoint paths (e.g. `"user"`).
    const RESOURCE: &'static str;

    /// The identifier, absent for drafts.
    fn id(&self) -> Option<&Self::Id>;

    /// Build the update payload from an edited copy of a record.
    fn to_update(&self) -> Self::Update;
}
