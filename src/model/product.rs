use super::resource_id;
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

resource_id!(
    /// Identifier of a persisted [`Product`].
    ProductId
);

/// A catalogue entry. `price` is optional only so a form can be empty; the backend
/// never stores a product without one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Product {
    pub fn new(product_name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            product_name: product_name.into(),
            price: Some(price),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(ProductId(id));
        self
    }
}

impl RestEntity for Product {
    type Id = ProductId;
    type Update = ProductUpdate;
    const RESOURCE: &'static str = "product";

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            product_name: Some(self.product_name.clone()),
            price: self.price,
        }
    }
}
