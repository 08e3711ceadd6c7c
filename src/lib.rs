//! # Admin Console
//!
//! > **A headless admin console for a REST backend.**
//!
//! Users, products and orders each get a list/add/edit/delete screen; a dashboard shell
//! around them carries the sidebar, theme, header, notifications, search and logout.
//! There is no UI toolkit here: screens and the shell are async state machines a view
//! layer drives with commands and renders from published snapshots.
//!
//! ## 🏗️ Design
//!
//! ### Gateways
//! Each resource has one `ResourceActor<T>` gateway (see the `resource-framework` crate)
//! that turns typed requests into HTTP calls. Calls run concurrently; nothing is queued
//! or retried, and failures come back exactly as the backend produced them.
//!
//! ### Screens
//! A [`CrudScreen`](screen::CrudScreen) owns its list and form state. After every
//! successful create, update or delete it refetches the whole list: the backend is the
//! single source of truth. Validation runs before anything is sent.
//!
//! ### Teardown
//! Screens and the shell run background tasks under a cancellation token. Tearing one
//! down stops its tasks and any call it still has in flight, so nothing settles against
//! discarded state.
//!
//! ### Observability
//! `tracing` everywhere, filtered by `RUST_LOG`. Gateways and screens log with an
//! `entity_type` field. See [`lifecycle::setup_tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: the records and dashboard payloads.
//! - [`validation`]: client-side checks.
//! - [`clients`]: resource-named wrappers over the framework client.
//! - [`screen`]: the per-resource controller.
//! - [`storage`] and [`session`]: persisted client state and the signed-in operator.
//! - [`dashboard`]: the dashboard endpoints.
//! - [`shell`] and [`router`]: the chrome and navigation.
//! - [`config`] and [`lifecycle`]: settings, startup and shutdown.
//!
//! ## 🚀 Running
//!
//! ```bash
//! # Point at a backend and run the demo with info logs
//! ADMIN_BACKEND_URL=http://localhost:8080 RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod router;
pub mod screen;
pub mod session;
pub mod shell;
pub mod storage;
pub mod validation;

pub use error::AdminError;
