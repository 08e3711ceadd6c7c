use super::GATEWAY_BUFFER;
use crate::model::{User, UserId, UserUpdate};
use async_trait::async_trait;
use resource_framework::{ClientError, ResourceActor, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the `/user` endpoints.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

/// Creates the User gateway and its client. The gateway still has to be `run`.
pub fn new() -> (ResourceActor<User>, UserClient) {
    let (actor, client) = ResourceActor::new(GATEWAY_BUFFER);
    (actor, UserClient::new(client))
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, user))]
    pub async fn save_user(&self, user: User) -> Result<User, ClientError> {
        debug!(?user, "save_user called");
        self.create(user).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, ClientError> {
        self.list().await
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<User, ClientError> {
        self.get(id).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<UserUpdate, ClientError> {
        debug!(?update, "update_user called");
        self.update(id, update).await
    }

    pub async fn delete_user_by_id(&self, id: UserId) -> Result<(), ClientError> {
        self.delete(id).await
    }
}

#[async_trait]
impl ResourceApi<User> for UserClient {
    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }
}
