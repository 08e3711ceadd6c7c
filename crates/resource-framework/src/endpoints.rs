//! # Endpoint Table
//!
//! Every resource is exposed under the same path convention:
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | list      | GET    | `/{r}/get-all-{r}s` |
//! | create    | POST   | `/{r}/save-{r}` |
//! | update    | PATCH  | `/{r}/update-{r}/{id}` |
//! | get       | GET    | `/{r}/get-{r}-by-id/{id}` |
//! | delete    | DELETE | `/{r}/delete-{r}-by-id/{id}` |

use crate::entity::RestEntity;
use std::fmt::Display;

/// Path builder for a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    resource: String,
}

impl Endpoints {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }

    /// Endpoints for the resource named by `T::RESOURCE`.
    pub fn for_entity<T: RestEntity>() -> Self {
        Self::new(T::RESOURCE)
    }

    pub fn list(&self) -> String {
        format!("/{r}/get-all-{r}s", r = self.resource)
    }

    pub fn create(&self) -> String {
        format!("/{r}/save-{r}", r = self.resource)
    }

    pub fn update(&self, id: &impl Display) -> String {
        format!("/{r}/update-{r}/{id}", r = self.resource)
    }

    pub fn get(&self, id: &impl Display) -> String {
        format!("/{r}/get-{r}-by-id/{id}", r = self.resource)
    }

    pub fn delete(&self, id: &impl Display) -> String {
        format!("/{r}/delete-{r}-by-id/{id}", r = self.resource)
    }
}
