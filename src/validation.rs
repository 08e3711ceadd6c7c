//! Client-side checks run before any create or update is sent.
//!
//! Rules are evaluated in a fixed order and stop at the first failure, so a form with
//! several problems always reports the same one.

use crate::model::{Order, Product, User};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Why a record was refused. The messages are shown to the operator verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username required")]
    UsernameRequired,
    #[error("email required")]
    EmailRequired,
    #[error("password required")]
    PasswordRequired,
    #[error("invalid email")]
    InvalidEmail,
    #[error("name required")]
    NameRequired,
    #[error("price required")]
    PriceRequired,
    #[error("price must be non-negative")]
    NegativePrice,
}

/// Implemented by every record a screen can submit.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Shared rule for priced records. NaN counts as negative.
fn validate_priced(name: &str, price: Option<f64>) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::NameRequired);
    }
    match price {
        None => Err(ValidationError::PriceRequired),
        Some(p) if p.is_nan() || p < 0.0 => Err(ValidationError::NegativePrice),
        Some(_) => Ok(()),
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.user_name) {
            return Err(ValidationError::UsernameRequired);
        }
        if is_blank(&self.email) {
            return Err(ValidationError::EmailRequired);
        }
        if is_blank(&self.password) {
            return Err(ValidationError::PasswordRequired);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_priced(&self.product_name, self.price)
    }
}

impl Validate for Order {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_priced(&self.order_name, self.price)
    }
}
