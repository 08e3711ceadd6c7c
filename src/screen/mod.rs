//! # Resource Screens
//!
//! One generic list/add/edit/delete controller, instantiated for users, products and
//! orders. A screen is an actor: the view sends it [`ScreenCommand`]s through a
//! [`ScreenHandle`] and renders the [`ScreenState`] snapshots it publishes.

mod controller;
mod error;
mod state;

pub use controller::{CrudScreen, ScreenCommand, ScreenHandle};
pub use error::ScreenError;
pub use state::{Mode, Notice, ScreenState};

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::model::{Order, Product, User};

pub type UserScreen = CrudScreen<User, UserClient>;
pub type ProductScreen = CrudScreen<Product, ProductClient>;
pub type OrderScreen = CrudScreen<Order, OrderClient>;
