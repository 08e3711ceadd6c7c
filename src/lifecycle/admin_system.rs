use crate::clients::{order_client, product_client, user_client};
use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::config::Settings;
use crate::dashboard::{DashboardApi, HttpDashboardApi};
use crate::error::AdminError;
use crate::model::{Order, Product, User};
use crate::router::Router;
use crate::screen::{OrderScreen, ProductScreen, ScreenHandle, UserScreen};
use crate::session::Session;
use crate::shell::DashboardShell;
use crate::storage::{JsonFileStore, KeyValueStore};
use resource_framework::{ReqwestTransport, SharedTransport};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running console: three resource gateways plus the session, router and dashboard
/// API the screens and shell share.
///
/// # Example
///
/// ```no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use admin_console::config::Settings;
/// use admin_console::lifecycle::AdminSystem;
///
/// let system = AdminSystem::start(&Settings::load()?)?;
/// let users = system.user_screen();
/// let ready = users.wait_until(|s| !s.loading).await?;
/// println!("{} users", ready.items.len());
///
/// // Screens hold clients; tear them down before the gateways can stop.
/// users.teardown().await;
/// system.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct AdminSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    session: Arc<Session>,
    dashboard: Arc<dyn DashboardApi>,
    router: Router,
    search_debounce: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl AdminSystem {
    /// Connects to the configured backend and restores client state from the state file.
    pub fn start(settings: &Settings) -> Result<Self, AdminError> {
        let transport =
            ReqwestTransport::new(settings.backend_url.clone(), settings.request_timeout)?;
        let store = JsonFileStore::open(&settings.state_file)?;
        Ok(Self::with_parts(settings, Arc::new(transport), Arc::new(store)))
    }

    /// Wires the system over any transport and store.
    pub fn with_parts(
        settings: &Settings,
        transport: SharedTransport,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let (user_actor, user_client) = user_client::new();
        let (product_actor, product_client) = product_client::new();
        let (order_actor, order_client) = order_client::new();

        let handles = vec![
            tokio::spawn(user_actor.run(transport.clone())),
            tokio::spawn(product_actor.run(transport.clone())),
            tokio::spawn(order_actor.run(transport.clone())),
        ];

        let session = Arc::new(Session::load(store));
        let dashboard: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(
            transport,
            session.clone(),
            settings.api_path.clone(),
        ));

        info!(backend = %settings.backend_url, api_path = %settings.api_path, "System started");

        Self {
            user_client,
            product_client,
            order_client,
            session,
            dashboard,
            router: Router::new(),
            search_debounce: settings.search_debounce,
            handles,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn dashboard(&self) -> Arc<dyn DashboardApi> {
        self.dashboard.clone()
    }

    /// Mounts a users screen; it loads the list straight away.
    pub fn user_screen(&self) -> ScreenHandle<User> {
        UserScreen::spawn(self.user_client.clone(), self.session.reader())
    }

    pub fn product_screen(&self) -> ScreenHandle<Product> {
        ProductScreen::spawn(self.product_client.clone(), self.session.reader())
    }

    pub fn order_screen(&self) -> ScreenHandle<Order> {
        OrderScreen::spawn(self.order_client.clone(), self.session.reader())
    }

    pub fn shell(&self) -> DashboardShell {
        DashboardShell::new(
            self.dashboard.clone(),
            self.session.clone(),
            self.router.clone(),
            self.search_debounce,
        )
    }

    /// Drops the clients and waits for every gateway to drain.
    ///
    /// Gateways stop only once no client is left, so every screen must be torn down
    /// first.
    pub async fn shutdown(self) -> Result<(), AdminError> {
        info!("Shutting down system...");

        drop(self.user_client);
        drop(self.product_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Gateway task failed");
                return Err(AdminError::Shutdown(format!("gateway task failed: {e}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
