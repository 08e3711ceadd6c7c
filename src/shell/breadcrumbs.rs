//! Page title and breadcrumb trail, derived from the current path.

use crate::router::{capitalize, strip_suffixes};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Path up to and including this segment.
    pub route: String,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    strip_suffixes(path).split('/').filter(|s| !s.is_empty())
}

/// Last path segment, capitalized; `"Dashboard"` at the root.
pub fn page_title(path: &str) -> String {
    segments(path)
        .last()
        .map(capitalize)
        .unwrap_or_else(|| "Dashboard".to_string())
}

pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let mut route = String::new();
    segments(path)
        .map(|segment| {
            route.push('/');
            route.push_str(segment);
            Breadcrumb {
                label: capitalize(segment),
                route: route.clone(),
            }
        })
        .collect()
}
