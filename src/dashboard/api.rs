use super::error::DashboardError;
use crate::model::{
    ActivityPage, CurrentUser, DashboardStats, ExportFormat, MenuItem, Notification,
    ProfileUpdate, RefreshResponse, SearchResult,
};
use crate::session::Session;
use async_trait::async_trait;
use resource_framework::{ApiRequest, ApiResponse, ClientError, Method, SharedTransport};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Operations behind the dashboard shell.
///
/// Reads that feed chrome (notifications, search, menu) never fail: they fall back to
/// something renderable and log the error instead.
#[async_trait]
pub trait DashboardApi: Send + Sync + 'static {
    /// The signed-in operator, from the session cache when there is one.
    async fn current_user(&self) -> Option<CurrentUser>;

    async fn stats(&self) -> Result<DashboardStats, DashboardError>;

    async fn notifications(&self, limit: u32, unread_only: bool) -> Vec<Notification>;

    async fn mark_notification_read(&self, id: u64) -> Result<(), DashboardError>;

    async fn mark_all_notifications_read(&self) -> Result<(), DashboardError>;

    async fn search(&self, query: &str) -> SearchResult;

    async fn menu_items(&self) -> Vec<MenuItem>;

    /// Ends the session on the server. Local state is cleared whatever the outcome.
    async fn logout(&self) -> Result<(), DashboardError>;

    async fn refresh_session(&self) -> Result<(), DashboardError>;

    async fn update_profile(&self, update: ProfileUpdate) -> Result<CurrentUser, DashboardError>;

    async fn activity_log(&self, page: u32, size: u32) -> Result<ActivityPage, DashboardError>;

    async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, DashboardError>;
}

/// [`DashboardApi`] over an [`HttpTransport`](resource_framework::HttpTransport).
///
/// Every request carries the session's bearer token. A `401` on any call clears the
/// session before the error is returned.
pub struct HttpDashboardApi {
    transport: SharedTransport,
    session: Arc<Session>,
    base: String,
}

impl HttpDashboardApi {
    /// `base` is prefixed to every path, e.g. `/api`.
    pub fn new(transport: SharedTransport, session: Arc<Session>, base: impl Into<String>) -> Self {
        Self {
            transport,
            session,
            base: base.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, format!("{}{path}", self.base)).with_bearer(self.session.token())
    }

    /// `PUT` with the empty JSON object the mark-read endpoints expect.
    fn put_empty(&self, path: &str) -> Result<ApiRequest, DashboardError> {
        Ok(self.request(Method::Put, path).with_json(&json!({}))?)
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, DashboardError> {
        let path = request.path.clone();
        self.transport
            .execute(request)
            .await
            .and_then(ApiResponse::into_result)
            .map_err(|e| self.translate(&path, e))
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, DashboardError> {
        let response = self.send(request).await?;
        Ok(response.decode()?)
    }

    fn translate(&self, path: &str, error: ClientError) -> DashboardError {
        if error.is_unauthorized() {
            warn!(path, "Session rejected by backend, signing out");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "Error clearing session");
            }
        } else {
            warn!(path, error = %error, "Dashboard request failed");
        }
        error.into()
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn current_user(&self) -> Option<CurrentUser> {
        if let Some(cached) = self.session.current_user() {
            return Some(cached);
        }
        match self
            .fetch::<CurrentUser>(self.request(Method::Get, "/user/current"))
            .await
        {
            Ok(user) => {
                if let Err(e) = self.session.set_current_user(user.clone()) {
                    warn!(error = %e, "Error caching current user");
                }
                Some(user)
            }
            Err(_) => self.session.current_user(),
        }
    }

    async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        self.fetch(self.request(Method::Get, "/dashboard/stats"))
            .await
    }

    async fn notifications(&self, limit: u32, unread_only: bool) -> Vec<Notification> {
        let mut request = self
            .request(Method::Get, "/notifications")
            .with_query("limit", limit.to_string());
        if unread_only {
            request = request.with_query("unreadOnly", "true");
        }
        self.fetch(request)
            .await
            .unwrap_or_else(|_| vec![Notification::welcome()])
    }

    #[instrument(skip(self))]
    async fn mark_notification_read(&self, id: u64) -> Result<(), DashboardError> {
        let request = self.put_empty(&format!("/notifications/{id}/read"))?;
        self.send(request).await?;
        debug!("Notification marked read");
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), DashboardError> {
        let request = self.put_empty("/notifications/read-all")?;
        self.send(request).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> SearchResult {
        let request = self.request(Method::Get, "/search").with_query("q", query);
        self.fetch(request).await.unwrap_or_default()
    }

    async fn menu_items(&self) -> Vec<MenuItem> {
        self.fetch(self.request(Method::Get, "/menu"))
            .await
            .unwrap_or_else(|_| MenuItem::defaults())
    }

    async fn logout(&self) -> Result<(), DashboardError> {
        let result = self
            .send(self.request(Method::Post, "/auth/logout"))
            .await
            .map(|_| ());
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Error clearing session");
        }
        info!(server_ack = result.is_ok(), "Logged out");
        result
    }

    async fn refresh_session(&self) -> Result<(), DashboardError> {
        let refreshed: RefreshResponse = self
            .fetch(self.request(Method::Post, "/auth/refresh"))
            .await?;
        if let Some(token) = refreshed.token {
            self.session.set_token(&token)?;
            debug!("Session token refreshed");
        }
        Ok(())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<CurrentUser, DashboardError> {
        let request = self
            .request(Method::Put, "/user/profile")
            .with_json(&update)?;
        let user: CurrentUser = self.fetch(request).await?;
        self.session.set_current_user(user.clone())?;
        Ok(user)
    }

    async fn activity_log(&self, page: u32, size: u32) -> Result<ActivityPage, DashboardError> {
        let request = self
            .request(Method::Get, "/activity-log")
            .with_query("page", page.to_string())
            .with_query("size", size.to_string());
        self.fetch(request).await
    }

    async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, DashboardError> {
        let request = self
            .request(Method::Get, "/dashboard/export")
            .with_query("format", format.as_str());
        Ok(self.send(request).await?.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use resource_framework::mock::MockTransport;

    fn operator() -> CurrentUser {
        CurrentUser {
            id: 7,
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: None,
            avatar: None,
        }
    }

    fn setup() -> (MockTransport, Arc<Session>, HttpDashboardApi) {
        let transport = MockTransport::new();
        let session = Arc::new(Session::load(Arc::new(MemoryStore::new())));
        let api = HttpDashboardApi::new(Arc::new(transport.clone()), session.clone(), "/api");
        (transport, session, api)
    }

    #[tokio::test]
    async fn test_current_user_is_fetched_once_then_cached() {
        let (transport, session, api) = setup();
        transport
            .on(Method::Get, "/api/user/current")
            .reply_json(200, &operator());

        assert_eq!(api.current_user().await, Some(operator()));
        assert_eq!(api.current_user().await, Some(operator()));
        assert_eq!(transport.requests_to(Method::Get, "/api/user/current").len(), 1);
        assert_eq!(session.current_user(), Some(operator()));
    }

    #[tokio::test]
    async fn test_current_user_unavailable() {
        let (transport, _session, api) = setup();
        transport
            .on(Method::Get, "/api/user/current")
            .reply_status(503);
        assert_eq!(api.current_user().await, None);
    }

    #[tokio::test]
    async fn test_requests_carry_token_and_query() {
        let (transport, session, api) = setup();
        session.set_token("t0ken").unwrap();
        transport
            .on(Method::Get, "/api/notifications")
            .reply_json(200, &vec![Notification::welcome()]);

        let notifications = api.notifications(5, true).await;
        assert_eq!(notifications.len(), 1);

        let sent = &transport.requests()[0];
        assert_eq!(sent.bearer.as_deref(), Some("t0ken"));
        assert_eq!(sent.query_value("limit"), Some("5"));
        assert_eq!(sent.query_value("unreadOnly"), Some("true"));

        transport
            .on(Method::Put, "/api/notifications/3/read")
            .reply_status(204);
        api.mark_notification_read(3).await.unwrap();
        let put = transport.requests_to(Method::Put, "/api/notifications/3/read");
        assert_eq!(put[0].body, Some(json!({})));
    }

    #[tokio::test]
    async fn test_chrome_reads_fall_back() {
        let (transport, _session, api) = setup();
        transport
            .on(Method::Get, "/api/notifications")
            .reply_status(500);
        transport
            .on(Method::Get, "/api/search")
            .reply_err(ClientError::Transport("timed out".into()));

        assert_eq!(api.notifications(10, false).await, vec![Notification::welcome()]);
        assert_eq!(api.search("widget").await, SearchResult::default());
        // `/menu` is unscripted and answers 404.
        assert_eq!(api.menu_items().await, MenuItem::defaults());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let (transport, session, api) = setup();
        session.set_current_user(operator()).unwrap();
        session.set_token("stale").unwrap();
        transport
            .on(Method::Get, "/api/dashboard/stats")
            .reply_status(401);

        let err = api.stats().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(session.current_user(), None);
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let (transport, session, api) = setup();
        session.set_current_user(operator()).unwrap();
        session.set_dark_mode(true).unwrap();
        transport
            .on(Method::Post, "/api/auth/logout")
            .reply_status(500);

        let err = api.logout().await.unwrap_err();
        assert_eq!(err.to_string(), "Server error. Please try again later.");
        assert_eq!(session.current_user(), None);
        assert!(!session.dark_mode());
    }

    #[tokio::test]
    async fn test_refresh_and_profile_update_persist() {
        let (transport, session, api) = setup();
        transport
            .on(Method::Post, "/api/auth/refresh")
            .reply_json(200, &json!({ "token": "fresh" }));
        let renamed = CurrentUser {
            name: "Grace H.".into(),
            ..operator()
        };
        transport
            .on(Method::Put, "/api/user/profile")
            .reply_json(200, &renamed);

        api.refresh_session().await.unwrap();
        assert_eq!(session.token().as_deref(), Some("fresh"));

        let update = ProfileUpdate {
            name: Some("Grace H.".into()),
            ..Default::default()
        };
        assert_eq!(api.update_profile(update).await.unwrap(), renamed);
        assert_eq!(session.current_user(), Some(renamed));
    }

    #[tokio::test]
    async fn test_export_returns_raw_bytes() {
        let (transport, _session, api) = setup();
        transport
            .on(Method::Get, "/api/dashboard/export")
            .reply_json(200, "id,name");
        let bytes = api.export(ExportFormat::Csv).await.unwrap();
        assert_eq!(bytes, b"\"id,name\"".to_vec());
        assert_eq!(transport.requests()[0].query_value("format"), Some("csv"));

        transport
            .on(Method::Get, "/api/activity-log")
            .reply_status(403);
        let err = api.activity_log(1, 20).await.unwrap_err();
        assert_eq!(err.to_string(), "Access denied");
    }
}
