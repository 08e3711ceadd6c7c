//! # Session Context
//!
//! The signed-in operator, the auth token and the shell's persisted flags, all backed by
//! one [`KeyValueStore`].
//!
//! [`Session`] is the only writer. Screens and other read-only consumers get a
//! [`SessionReader`], which can observe the current user but not change it.

use crate::model::CurrentUser;
use crate::storage::{keys, KeyValueStore, StorageError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

pub struct Session {
    store: Arc<dyn KeyValueStore>,
    user: watch::Sender<Option<CurrentUser>>,
}

impl Session {
    /// Restores the cached current user from `store`. An unreadable cache is logged
    /// and treated as signed out.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let cached = store
            .get(keys::CURRENT_USER)
            .and_then(|raw| match serde_json::from_str::<CurrentUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Error parsing stored user");
                    None
                }
            });
        let (user, _) = watch::channel(cached);
        Self { store, user }
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            store: self.store.clone(),
            user: self.user.subscribe(),
        }
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.borrow().clone()
    }

    /// Caches `user` and publishes it to every reader.
    pub fn set_current_user(&self, user: CurrentUser) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&user)?;
        self.store.set(keys::CURRENT_USER, &encoded)?;
        self.user.send_replace(Some(user));
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(keys::AUTH_TOKEN)
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(keys::AUTH_TOKEN, token)
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.store.get_flag(keys::SIDEBAR_COLLAPSED)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> Result<(), StorageError> {
        self.store.set_flag(keys::SIDEBAR_COLLAPSED, collapsed)
    }

    pub fn dark_mode(&self) -> bool {
        self.store.get_flag(keys::DARK_MODE)
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<(), StorageError> {
        self.store.set_flag(keys::DARK_MODE, enabled)
    }

    /// Wipes every persisted key. Readers see `None` even if the store fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.user.send_replace(None);
        info!("Session cleared");
        self.store.clear()
    }
}

/// Read-only view of the [`Session`].
#[derive(Clone)]
pub struct SessionReader {
    store: Arc<dyn KeyValueStore>,
    user: watch::Receiver<Option<CurrentUser>>,
}

impl SessionReader {
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.borrow().clone()
    }

    /// Name of the signed-in operator, for log fields.
    pub fn operator(&self) -> Option<String> {
        self.user.borrow().as_ref().map(|u| u.name.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.borrow().is_some() || self.store.get(keys::AUTH_TOKEN).is_some()
    }

    /// Change notifications for the current user.
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn operator() -> CurrentUser {
        CurrentUser {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Some("admin".into()),
            avatar: None,
        }
    }

    #[test]
    fn test_restores_cached_user() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(keys::CURRENT_USER, &serde_json::to_string(&operator()).unwrap())
            .unwrap();

        let session = Session::load(store);
        assert_eq!(session.current_user(), Some(operator()));
        assert_eq!(session.reader().operator().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_corrupt_cache_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CURRENT_USER, "{not json").unwrap();

        let session = Session::load(store);
        assert_eq!(session.current_user(), None);
    }

    #[tokio::test]
    async fn test_clear_wipes_store_and_notifies_readers() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::load(store.clone());
        let reader = session.reader();
        let mut changes = reader.subscribe();

        session.set_current_user(operator()).unwrap();
        session.set_token("t0ken").unwrap();
        session.set_dark_mode(true).unwrap();
        changes.changed().await.unwrap();
        assert!(reader.is_signed_in());

        session.clear().unwrap();
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), None);
        assert!(store.is_empty());
        assert!(!reader.is_signed_in());
        assert!(!session.dark_mode());
    }
}
