//! Path-to-screen routing.
//!
//! The resource screens live under the dashboard shell, so `/dashboard/products` and
//! `/products` reach the same place. Anything unrecognized lands on the users screen.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

const DEFAULT_PATH: &str = "/";
const SHELL_PREFIX: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Users,
    Products,
    Orders,
    Login,
}

impl Route {
    /// Screen for `path`, ignoring any query string or fragment.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = strip_suffixes(path).trim_end_matches('/');
        let path = match path.strip_prefix(SHELL_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };
        match path {
            "" | "/user" | "/users" => Some(Route::Users),
            "/product" | "/products" => Some(Route::Products),
            "/order" | "/orders" => Some(Route::Orders),
            "/login" => Some(Route::Login),
            _ => None,
        }
    }

    /// Canonical path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Users => "/users",
            Route::Products => "/products",
            Route::Orders => "/orders",
            Route::Login => "/login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Drops `?query` and `#fragment`.
pub(crate) fn strip_suffixes(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Upper-cases the first letter; used for page titles and screen nouns.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Current location, shared by the shell and whoever drives navigation.
#[derive(Debug, Clone)]
pub struct Router {
    current: Arc<watch::Sender<String>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        let (current, _) = watch::channel(DEFAULT_PATH.to_string());
        Self {
            current: Arc::new(current),
        }
    }

    /// Moves to `path`, or to the default screen when no route matches it.
    pub fn navigate(&self, path: &str) -> Route {
        let (path, route) = match Route::resolve(path) {
            Some(route) => (path.to_string(), route),
            None => {
                debug!(path, "Unknown route, redirecting");
                (DEFAULT_PATH.to_string(), Route::Users)
            }
        };
        debug!(%path, ?route, "Navigate");
        self.current.send_replace(path);
        route
    }

    pub fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn current_route(&self) -> Route {
        Route::resolve(&self.current.borrow()).unwrap_or(Route::Users)
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("order"), "Order");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve("/"), Some(Route::Users));
        assert_eq!(Route::resolve(""), Some(Route::Users));
        assert_eq!(Route::resolve("/user"), Some(Route::Users));
        assert_eq!(Route::resolve("/products/"), Some(Route::Products));
        assert_eq!(Route::resolve("/dashboard/orders?page=2"), Some(Route::Orders));
        assert_eq!(Route::resolve("/dashboard"), Some(Route::Users));
        assert_eq!(Route::resolve("/login#next"), Some(Route::Login));
        assert_eq!(Route::resolve("/dashboardx"), None);
        assert_eq!(Route::resolve("/settings"), None);
    }

    #[tokio::test]
    async fn test_navigate_publishes_and_redirects() {
        let router = Router::new();
        let mut changes = router.subscribe();

        assert_eq!(router.navigate("/dashboard/products"), Route::Products);
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), "/dashboard/products");
        assert_eq!(router.current_route(), Route::Products);

        assert_eq!(router.navigate("/nowhere"), Route::Users);
        assert_eq!(router.current_path(), "/");
    }
}
