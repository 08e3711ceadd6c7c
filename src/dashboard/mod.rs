//! The dashboard backend surface: current user, notifications, search, menu, session
//! and reporting endpoints, all under the configured API prefix.

mod api;
mod error;

pub use api::{DashboardApi, HttpDashboardApi};
pub use error::DashboardError;
