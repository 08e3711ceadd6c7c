//! # Dashboard Shell
//!
//! The chrome around the resource screens: sidebar and theme flags, the header,
//! notifications, the menu, search and logout.
//!
//! The shell runs two background tasks, the header listener and the
//! [`SearchDebouncer`]. Both hang off the shell's cancellation token and stop on
//! [`teardown`](DashboardShell::teardown) or when the shell is dropped.

mod breadcrumbs;
mod search;

pub use breadcrumbs::{breadcrumbs, page_title, Breadcrumb};
pub use search::{SearchDebouncer, SearchOutcome};

use crate::dashboard::{DashboardApi, DashboardError};
use crate::model::{CurrentUser, DashboardStats, MenuItem, Notification};
use crate::router::{Route, Router};
use crate::session::Session;
use crate::storage::StorageError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

/// Notifications fetched per load.
pub const NOTIFICATION_LIMIT: u32 = 10;

/// What the header shows for the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl Header {
    pub fn for_path(path: &str) -> Self {
        Self {
            title: page_title(path),
            breadcrumbs: breadcrumbs(path),
        }
    }
}

pub struct DashboardShell {
    api: Arc<dyn DashboardApi>,
    session: Arc<Session>,
    router: Router,
    notifications: Vec<Notification>,
    menu: Vec<MenuItem>,
    search: SearchDebouncer,
    header: watch::Receiver<Header>,
    token: CancellationToken,
    _stop_on_drop: DropGuard,
    listener: JoinHandle<()>,
}

impl DashboardShell {
    /// Mounts the shell. Must be called inside a Tokio runtime.
    pub fn new(
        api: Arc<dyn DashboardApi>,
        session: Arc<Session>,
        router: Router,
        search_debounce: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let (header_tx, header) = watch::channel(Header::for_path(&router.current_path()));
        let listener = tokio::spawn(follow_location(
            router.subscribe(),
            header_tx,
            token.child_token(),
        ));
        let search = SearchDebouncer::spawn(api.clone(), search_debounce, &token);

        Self {
            api,
            session,
            router,
            notifications: Vec::new(),
            menu: MenuItem::defaults(),
            search,
            header,
            _stop_on_drop: token.clone().drop_guard(),
            token,
            listener,
        }
    }

    /// Fetches the menu and the notifications.
    pub async fn load(&mut self) {
        self.load_menu().await;
        self.load_notifications().await;
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.session.sidebar_collapsed()
    }

    /// Flips and persists the sidebar flag; returns the new value.
    pub fn toggle_sidebar(&self) -> Result<bool, StorageError> {
        let collapsed = !self.session.sidebar_collapsed();
        self.session.set_sidebar_collapsed(collapsed)?;
        Ok(collapsed)
    }

    pub fn dark_mode(&self) -> bool {
        self.session.dark_mode()
    }

    /// Flips and persists the theme flag; returns the new value.
    pub fn toggle_theme(&self) -> Result<bool, StorageError> {
        let dark = !self.session.dark_mode();
        self.session.set_dark_mode(dark)?;
        debug!(dark, "Theme toggled");
        Ok(dark)
    }

    pub fn header(&self) -> Header {
        self.header.borrow().clone()
    }

    pub fn subscribe_header(&self) -> watch::Receiver<Header> {
        self.header.clone()
    }

    pub fn navigate(&self, path: &str) -> Route {
        self.router.navigate(path)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.api.current_user().await
    }

    pub async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let result = self.api.stats().await;
        self.check_session(result)
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub async fn load_menu(&mut self) {
        self.menu = self.api.menu_items().await;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub async fn load_notifications(&mut self) {
        self.notifications = self.api.notifications(NOTIFICATION_LIMIT, false).await;
        debug!(
            count = self.notifications.len(),
            unread = self.unread_count(),
            "Notifications loaded"
        );
    }

    /// Marks one notification read, locally only once the server agrees.
    pub async fn mark_read(&mut self, id: u64) -> Result<(), DashboardError> {
        let result = self.api.mark_notification_read(id).await;
        self.check_session(result)?;
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
        Ok(())
    }

    pub async fn mark_all_read(&mut self) -> Result<(), DashboardError> {
        let result = self.api.mark_all_notifications_read().await;
        self.check_session(result)?;
        for notification in &mut self.notifications {
            notification.read = true;
        }
        Ok(())
    }

    /// Feeds the search box. See [`SearchDebouncer`].
    pub fn search(&self, text: impl Into<String>) {
        self.search.push(text);
    }

    pub fn search_results(&self) -> watch::Receiver<Option<SearchOutcome>> {
        self.search.results()
    }

    /// Signs out. Local state is cleared and the login screen shown even when the
    /// server call fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Logout request failed");
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Error clearing session");
        }
        self.notifications.clear();
        self.router.navigate(Route::Login.path());
        info!("Signed out");
    }

    /// Sends the operator to the login screen when the backend dropped the session.
    fn check_session<R>(&self, result: Result<R, DashboardError>) -> Result<R, DashboardError> {
        if let Err(e) = &result {
            if e.is_unauthorized() {
                self.router.navigate(Route::Login.path());
            }
        }
        result
    }

    /// Stops the header listener and the search debouncer.
    pub async fn teardown(self) {
        self.token.cancel();
        let Self {
            search, listener, ..
        } = self;
        search.shutdown().await;
        if let Err(e) = listener.await {
            warn!(error = %e, "Header listener failed");
        }
        debug!("Shell torn down");
    }
}

async fn follow_location(
    mut location: watch::Receiver<String>,
    header: watch::Sender<Header>,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            changed = location.changed() => {
                if changed.is_err() {
                    break;
                }
                let path = location.borrow_and_update().clone();
                header.send_replace(Header::for_path(&path));
            }
        }
    }
}
