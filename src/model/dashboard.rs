//! Payloads exchanged with the dashboard endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in operator, as cached under `currentUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial profile change sent to `PUT /user/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Headline numbers; the backend decides what each entry looks like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub stats: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub icon: String,
    pub time: String,
    pub read: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Notification {
    /// Shown in place of the real list when it cannot be fetched.
    pub fn welcome() -> Self {
        Self {
            id: 1,
            title: "Welcome to the dashboard".to_string(),
            icon: "info".to_string(),
            time: "Just now".to_string(),
            read: false,
            kind: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub route: String,
    pub icon: String,
}

impl MenuItem {
    pub fn new(label: &str, route: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            route: route.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Menu used when `/menu` is unavailable: one entry per resource screen.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Users", "/users", "users"),
            Self::new("Products", "/products", "products"),
            Self::new("Orders", "/orders", "orders"),
        ]
    }
}

/// One page of the activity log, passed through as the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityPage(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
    Excel,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RefreshResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_type_field() {
        let n: Notification = serde_json::from_value(json!({
            "id": 3, "title": "Disk low", "icon": "warn", "time": "5m", "read": false, "type": "alert"
        }))
        .unwrap();
        assert_eq!(n.kind.as_deref(), Some("alert"));

        let welcome = serde_json::to_value(Notification::welcome()).unwrap();
        assert!(welcome.get("type").is_none());
    }
}
