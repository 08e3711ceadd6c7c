//! Startup, wiring and shutdown.
//!
//! - [`AdminSystem`] spawns the resource gateways and hands out screens and the shell.
//! - [`setup_tracing`] installs the log subscriber.

pub mod admin_system;

pub use admin_system::AdminSystem;
pub use resource_framework::tracing::setup_tracing;
