use super::resource_id;
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

resource_id!(
    /// Identifier of a persisted [`Order`].
    OrderId
);

/// An order line as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub order_name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Order {
    pub fn new(order_name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            order_name: order_name.into(),
            price: Some(price),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(OrderId(id));
        self
    }
}

impl RestEntity for Order {
    type Id = OrderId;
    type Update = OrderUpdate;
    const RESOURCE: &'static str = "order";

    fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }

    fn to_update(&self) -> OrderUpdate {
        OrderUpdate {
            order_name: Some(self.order_name.clone()),
            price: self.price,
        }
    }
}
