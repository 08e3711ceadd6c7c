//! Plain records implementing [`RestEntity`](resource_framework::RestEntity), plus the
//! dashboard payloads.

pub mod dashboard;
pub mod order;
pub mod product;
pub mod user;

pub use dashboard::*;
pub use order::*;
pub use product::*;
pub use user::*;

/// Declares a server-assigned id: a transparent `u64` that renders as a bare number in
/// paths and JSON.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

pub(crate) use resource_id;
