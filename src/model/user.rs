use super::resource_id;
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};
use std::fmt;

resource_id!(
    /// Identifier of a persisted [`User`].
    UserId
);

/// A user account as the backend stores it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Partial update for a [`User`]. Absent fields are left out of the JSON entirely.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// Passwords never reach the logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl User {
    /// A draft: no id until the server assigns one.
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(UserId(id));
        self
    }
}

impl RestEntity for User {
    type Id = UserId;
    type Update = UserUpdate;
    const RESOURCE: &'static str = "user";

    fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    fn to_update(&self) -> UserUpdate {
        UserUpdate {
            user_name: Some(self.user_name.clone()),
            email: Some(self.email.clone()),
            password: Some(self.password.clone()),
        }
    }
}
