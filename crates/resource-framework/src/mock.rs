//! # Mock Framework & Testing Guide
//!
//! Two doubles are provided, one for each seam:
//!
//! * [`MockClient<T>`] stands in for a running gateway. It hands out a real
//!   `ResourceClient<T>` whose requests are answered from a queue of expectations, so code
//!   written against [`ResourceApi`](crate::ResourceApi) can be tested without any HTTP.
//! * [`MockTransport`] stands in for the network. A real `ResourceActor` (or anything else
//!   that takes a [`SharedTransport`](crate::SharedTransport)) talks to it, and it answers
//!   with scripted responses and records every request it saw.
//!
//! ## When to use which
//!
//! | Feature | MockClient | MockTransport |
//! |---------|------------|---------------|
//! | **Layer under test** | Code *around* the client (screens) | The gateway itself, paths and bodies |
//! | **Answers** | Typed values in call order | Raw status + JSON per route |
//! | **Error Injection** | `return_err(ClientError)` | `reply_status(500)` / `reply_err(..)` |
//!
//! ## Pattern 0: Client Logic Test (Pure Mock)
//!
//! ```rust
//! use resource_framework::mock::MockClient;
//! use resource_framework::{ClientError, RestEntity};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Tag { id: Option<u64>, label: String }
//!
//! impl RestEntity for Tag {
//!     type Id = u64;
//!     type Update = Tag;
//!     const RESOURCE: &'static str = "tag";
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn to_update(&self) -> Tag { self.clone() }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_list().return_ok(vec![Tag { id: Some(1), label: "new".into() }]);
//!     mock.expect_delete(1).return_err(ClientError::Status { status: 500, message: "boom".into() });
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(client.delete(1).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 1: Gateway over a scripted transport
//!
//! See `tests/integration_test.rs` for a `ResourceActor` driven by [`MockTransport`].
//!
//! ## Raw channel helpers
//!
//! When a test needs to hold a reply back (to observe a loading state, say), use
//! [`create_mock_client`] and answer requests by hand with the `expect_*` helpers.

use crate::client::ResourceClient;
use crate::entity::RestEntity;
use crate::error::ClientError;
use crate::message::{ResourceRequest, Response};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: RestEntity> {
    List {
        response: Result<Vec<T>, ClientError>,
    },
    Get {
        id: T::Id,
        response: Result<T, ClientError>,
    },
    Create {
        response: Result<T, ClientError>,
    },
    Update {
        id: T::Id,
        response: Result<T::Update, ClientError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), ClientError>,
    },
}

/// A request observed by a [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall<T: RestEntity> {
    List,
    Get(T::Id),
    Create(T),
    Update(T::Id, T::Update),
    Delete(T::Id),
}

struct MockState<T: RestEntity> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<RecordedCall<T>>,
    failures: Vec<String>,
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation is answered with `ClientError::Transport` and reported by [`verify`].
///
/// [`verify`]: MockClient::verify
pub struct MockClient<T: RestEntity> {
    client: ResourceClient<T>,
    state: Arc<Mutex<MockState<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: RestEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RestEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            calls: Vec::new(),
            failures: Vec::new(),
        }));
        let shared = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut state = shared.lock().unwrap();
                let expectation = state.expectations.pop_front();
                answer(&mut state, request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.state.lock().unwrap().expectations.push_back(expectation);
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::Update> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall<T>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.failures.is_empty() {
            panic!("Unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

fn answer<T: RestEntity>(
    state: &mut MockState<T>,
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) {
    fn reply<T: RestEntity, R>(
        state: &mut MockState<T>,
        respond_to: Response<R>,
        result: Result<R, String>,
    ) {
        let result = result.map_err(|why| {
            state.failures.push(why.clone());
            ClientError::Transport(why)
        });
        let _ = respond_to.send(result);
    }

    match (request, expectation) {
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            state.calls.push(RecordedCall::List);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            state.calls.push(RecordedCall::Get(id.clone()));
            if id == want {
                let _ = respond_to.send(response);
            } else {
                reply(state, respond_to, Err(format!("get {id}, expected get {want}")));
            }
        }
        (ResourceRequest::Create { draft, respond_to }, Some(Expectation::Create { response })) => {
            state.calls.push(RecordedCall::Create(draft));
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            },
            Some(Expectation::Update { id: want, response }),
        ) => {
            state.calls.push(RecordedCall::Update(id.clone(), update));
            if id == want {
                let _ = respond_to.send(response);
            } else {
                reply(state, respond_to, Err(format!("update {id}, expected update {want}")));
            }
        }
        (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
            state.calls.push(RecordedCall::Delete(id.clone()));
            if id == want {
                let _ = respond_to.send(response);
            } else {
                reply(state, respond_to, Err(format!("delete {id}, expected delete {want}")));
            }
        }
        (request, _) => {
            let why = format!("unexpected {} request", request.operation());
            match request {
                ResourceRequest::List { respond_to } => {
                    state.calls.push(RecordedCall::List);
                    reply(state, respond_to, Err(why));
                }
                ResourceRequest::Get { id, respond_to } => {
                    state.calls.push(RecordedCall::Get(id));
                    reply(state, respond_to, Err(why));
                }
                ResourceRequest::Create { draft, respond_to } => {
                    state.calls.push(RecordedCall::Create(draft));
                    reply(state, respond_to, Err(why));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    state.calls.push(RecordedCall::Update(id, update));
                    reply(state, respond_to, Err(why));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    state.calls.push(RecordedCall::Delete(id));
                    reply(state, respond_to, Err(why));
                }
            }
        }
    }
}

/// Builder returned by the `MockClient::expect_*` methods.
pub struct ExpectationBuilder<'a, T: RestEntity, R> {
    mock: &'a MockClient<T>,
    make: Box<dyn FnOnce(Result<R, ClientError>) -> Expectation<T> + Send>,
}

impl<'a, T: RestEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        make: impl FnOnce(Result<R, ClientError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            mock,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ClientError) {
        self.mock.push((self.make)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers the requests; the test does, through the `respond_to` channels the
/// `expect_*` helpers hand back.
pub fn create_mock_client<T: RestEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T::Update>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

// =============================================================================
// SCRIPTED TRANSPORT
// =============================================================================

type Reply = Result<ApiResponse, ClientError>;

#[derive(Default)]
struct Script {
    routes: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<ApiRequest>,
}

/// An [`HttpTransport`] that answers from per-route scripts.
///
/// Replies for a route are consumed in order; the last one keeps answering once the
/// others are used up. Unscripted routes answer `404`.
#[derive(Default, Clone)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start scripting `method path`. Query strings are not part of the route.
    pub fn on(&self, method: Method, path: impl Into<String>) -> RouteBuilder<'_> {
        RouteBuilder {
            transport: self,
            route: (method, path.into()),
        }
    }

    /// Every request executed so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Requests that hit `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut script = self.script.lock().unwrap();
        let route = (request.method, request.path.clone());
        script.requests.push(request);
        match script.routes.get_mut(&route) {
            Some(replies) if replies.len() > 1 => replies.pop_front().unwrap_or_else(not_found),
            Some(replies) => replies.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> Reply {
    Ok(ApiResponse::new(404, b"no route".to_vec()))
}

/// Builder returned by [`MockTransport::on`].
pub struct RouteBuilder<'a> {
    transport: &'a MockTransport,
    route: (Method, String),
}

impl RouteBuilder<'_> {
    fn push(self, reply: Reply) {
        let mut script = self.transport.script.lock().unwrap();
        script.routes.entry(self.route).or_default().push_back(reply);
    }

    /// Answer with `status` and `body` serialized as JSON.
    pub fn reply_json<B: Serialize + ?Sized>(self, status: u16, body: &B) {
        let reply = ApiResponse::json(status, body);
        self.push(reply);
    }

    /// Answer with `status` and an empty body.
    pub fn reply_status(self, status: u16) {
        self.push(Ok(ApiResponse::empty(status)));
    }

    /// Fail before any response arrives.
    pub fn reply_err(self, error: ClientError) {
        self.push(Err(error));
    }
}
