#![allow(dead_code)]

use admin_console::config::Settings;
use admin_console::lifecycle::AdminSystem;
use admin_console::storage::{KeyValueStore, MemoryStore};
use async_trait::async_trait;
use resource_framework::{ApiRequest, ApiResponse, ClientError, HttpTransport, Method};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the REST backend: one table per resource plus the dashboard
/// endpoints under `/api`.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

#[derive(Default)]
struct BackendState {
    tables: HashMap<String, BTreeMap<u64, Value>>,
    next_id: u64,
    failures: Vec<(Method, u16)>,
    log: Vec<ApiRequest>,
    notifications: Vec<Value>,
    current_user: Option<Value>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts `record`, which must carry an `id`.
    pub fn seed<T: Serialize>(&self, resource: &str, record: &T) {
        let value = serde_json::to_value(record).unwrap();
        let id = value["id"].as_u64().expect("seeded records need an id");
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state
            .tables
            .entry(resource.to_string())
            .or_default()
            .insert(id, value);
    }

    /// The next request with `method` answers `status` instead of being served.
    pub fn fail_next(&self, method: Method, status: u16) {
        self.state.lock().unwrap().failures.push((method, status));
    }

    pub fn set_notifications(&self, notifications: Value) {
        let Value::Array(items) = notifications else {
            panic!("notifications must be an array");
        };
        self.state.lock().unwrap().notifications = items;
    }

    pub fn set_current_user(&self, user: Value) {
        self.state.lock().unwrap().current_user = Some(user);
    }

    pub fn ids(&self, resource: &str) -> Vec<u64> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(resource)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }

    /// Queries that reached `/api/search`, in order.
    pub fn searches(&self) -> Vec<String> {
        self.requests_to(Method::Get, "/api/search")
            .iter()
            .filter_map(|r| r.query_value("q").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for FakeBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());

        if let Some(pos) = state.failures.iter().position(|(m, _)| *m == request.method) {
            let (_, status) = state.failures.remove(pos);
            return Ok(ApiResponse::new(status, b"scripted failure".to_vec()));
        }

        let segments: Vec<&str> = request
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let response = match segments.as_slice() {
            ["api", rest @ ..] => state.dashboard(&request, rest),
            [resource, action] => state.resource(&request, resource, action, None),
            [resource, action, id] => match id.parse() {
                Ok(id) => state.resource(&request, resource, action, Some(id)),
                Err(_) => reply(404, &"bad id"),
            },
            _ => reply(404, &"no route"),
        };
        Ok(response)
    }
}

fn reply<B: Serialize + ?Sized>(status: u16, body: &B) -> ApiResponse {
    ApiResponse::json(status, body).unwrap()
}

impl BackendState {
    fn resource(
        &mut self,
        request: &ApiRequest,
        resource: &str,
        action: &str,
        id: Option<u64>,
    ) -> ApiResponse {
        let table = self.tables.entry(resource.to_string()).or_default();
        let body = request.body.clone().unwrap_or(Value::Null);

        match (request.method, id) {
            (Method::Get, None) if action == format!("get-all-{resource}s") => {
                reply(200, &table.values().collect::<Vec<_>>())
            }
            (Method::Post, None) if action == format!("save-{resource}") => {
                self.next_id += 1;
                let mut record = body;
                record["id"] = json!(self.next_id);
                table.insert(self.next_id, record.clone());
                reply(200, &record)
            }
            (Method::Patch, Some(id)) if action == format!("update-{resource}") => {
                let Some(record) = table.get_mut(&id) else {
                    return reply(404, &"not found");
                };
                if let (Value::Object(target), Value::Object(fields)) = (record, body) {
                    merge(target, fields);
                }
                reply(200, &table[&id])
            }
            (Method::Get, Some(id)) if action == format!("get-{resource}-by-id") => {
                match table.get(&id) {
                    Some(record) => reply(200, record),
                    None => reply(404, &"not found"),
                }
            }
            (Method::Delete, Some(id)) if action == format!("delete-{resource}-by-id") => {
                match table.remove(&id) {
                    Some(_) => ApiResponse::empty(200),
                    None => reply(404, &"not found"),
                }
            }
            _ => reply(404, &"no route"),
        }
    }

    fn dashboard(&mut self, request: &ApiRequest, path: &[&str]) -> ApiResponse {
        match (request.method, path) {
            (Method::Get, ["user", "current"]) => match &self.current_user {
                Some(user) => reply(200, user),
                None => reply(401, &"signed out"),
            },
            (Method::Get, ["dashboard", "stats"]) => reply(200, &json!({ "stats": [] })),
            (Method::Get, ["notifications"]) => reply(200, &self.notifications),
            (Method::Put, ["notifications", "read-all"]) => {
                for n in &mut self.notifications {
                    n["read"] = json!(true);
                }
                reply(200, &json!({}))
            }
            (Method::Put, ["notifications", id, "read"]) => {
                let id: u64 = id.parse().unwrap_or_default();
                match self.notifications.iter_mut().find(|n| n["id"] == json!(id)) {
                    Some(n) => {
                        n["read"] = json!(true);
                        reply(200, &json!({}))
                    }
                    None => reply(404, &"not found"),
                }
            }
            (Method::Get, ["search"]) => {
                let q = request.query_value("q").unwrap_or_default();
                reply(200, &json!({ "items": [{ "match": q }], "total": 1 }))
            }
            (Method::Post, ["auth", "logout"]) => ApiResponse::empty(200),
            _ => reply(404, &"no route"),
        }
    }
}

fn merge(target: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

pub fn test_settings() -> Settings {
    Settings::default()
}

/// A system over `backend` with a throwaway store.
pub fn start_system(backend: &Arc<FakeBackend>) -> AdminSystem {
    start_system_with_store(backend, Arc::new(MemoryStore::new()))
}

pub fn start_system_with_store(
    backend: &Arc<FakeBackend>,
    store: Arc<dyn KeyValueStore>,
) -> AdminSystem {
    AdminSystem::with_parts(&test_settings(), backend.clone(), store)
}
