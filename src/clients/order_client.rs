use super::GATEWAY_BUFFER;
use crate::model::{Order, OrderId, OrderUpdate};
use async_trait::async_trait;
use resource_framework::{ClientError, ResourceActor, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the `/order` endpoints.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

/// Creates the Order gateway and its client. The gateway still has to be `run`.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, client) = ResourceActor::new(GATEWAY_BUFFER);
    (actor, OrderClient::new(client))
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order))]
    pub async fn save_order(&self, order: Order) -> Result<Order, ClientError> {
        debug!(?order, "save_order called");
        self.create(order).await
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.list().await
    }

    pub async fn get_order_by_id(&self, id: OrderId) -> Result<Order, ClientError> {
        self.get(id).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<OrderUpdate, ClientError> {
        debug!(?update, "update_order called");
        self.update(id, update).await
    }

    pub async fn delete_order_by_id(&self, id: OrderId) -> Result<(), ClientError> {
        self.delete(id).await
    }
}

#[async_trait]
impl ResourceApi<Order> for OrderClient {
    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }
}
