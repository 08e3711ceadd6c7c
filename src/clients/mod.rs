//! Type-safe wrappers around [`ResourceClient`](resource_framework::ResourceClient).
//!
//! Each wrapper adds resource-named methods on top of the generic
//! [`ResourceApi`](resource_framework::ResourceApi) operations. Errors are passed through
//! untouched; screens decide what the operator reads.

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;

/// Request buffer for each resource gateway.
pub const GATEWAY_BUFFER: usize = 32;
