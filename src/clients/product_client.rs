use super::GATEWAY_BUFFER;
use crate::model::{Product, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_framework::{ClientError, ResourceActor, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the `/product` endpoints.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

/// Creates the Product gateway and its client. The gateway still has to be `run`.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, client) = ResourceActor::new(GATEWAY_BUFFER);
    (actor, ProductClient::new(client))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, product))]
    pub async fn save_product(&self, product: Product) -> Result<Product, ClientError> {
        debug!(?product, "save_product called");
        self.create(product).await
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, ClientError> {
        self.list().await
    }

    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, ClientError> {
        self.get(id).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductUpdate, ClientError> {
        debug!(?update, "update_product called");
        self.update(id, update).await
    }

    pub async fn delete_product_by_id(&self, id: ProductId) -> Result<(), ClientError> {
        self.delete(id).await
    }
}

#[async_trait]
impl ResourceApi<Product> for ProductClient {
    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockClient;

    #[tokio::test]
    async fn test_update_returns_server_echo() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_update(ProductId(5)).return_ok(ProductUpdate {
            price: Some(12.0),
            ..Default::default()
        });
        mock.expect_get(ProductId(5))
            .return_ok(Product::new("Widget", 12.0).with_id(5));

        let client = ProductClient::new(mock.client());
        let echoed = client
            .update_product(
                ProductId(5),
                ProductUpdate {
                    price: Some(12.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(echoed.price, Some(12.0));
        assert_eq!(echoed.product_name, None);

        let fetched = client.get_product_by_id(ProductId(5)).await.unwrap();
        assert_eq!(fetched.product_name, "Widget");
        mock.verify();
    }
}
