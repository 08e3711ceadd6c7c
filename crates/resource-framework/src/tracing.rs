//! # Observability & Tracing
//!
//! Structured logging for gateways and everything built on them.
//!
//! Every gateway logs with an `entity_type` field (the resource segment, e.g. `user`)
//! instead of a module path, so [`setup_tracing`] turns targets off and uses the compact
//! format.
//!
//! ```bash
//! # Lifecycle and successful writes
//! RUST_LOG=info cargo run
//!
//! # Every request, with payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a create looks like:
//!
//! ```text
//! INFO Gateway started entity_type="user"
//! INFO create: Created entity_type="user" id=5
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Calling it a second time is harmless: the second subscriber is simply not installed.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
