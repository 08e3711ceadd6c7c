//! # SearchDebouncer
//!
//! Forwards the search box to [`DashboardApi::search`] once typing pauses. Every
//! keystroke restarts the quiet window; only the text present when the window
//! elapses is sent.

use crate::dashboard::DashboardApi;
use crate::model::SearchResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A dispatched query and what came back for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub result: SearchResult,
}

pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    results: watch::Receiver<Option<SearchOutcome>>,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Starts the debounce task. It stops when `parent` is cancelled or on
    /// [`shutdown`](Self::shutdown).
    pub fn spawn(
        api: Arc<dyn DashboardApi>,
        window: Duration,
        parent: &CancellationToken,
    ) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (results_tx, results) = watch::channel(None);
        let token = parent.child_token();
        let task = tokio::spawn(debounce(api, window, input_rx, results_tx, token.clone()));
        Self {
            input,
            results,
            token,
            task,
        }
    }

    /// Replaces the search text. Blank text cancels whatever was waiting.
    pub fn push(&self, text: impl Into<String>) {
        if self.input.send(text.into()).is_err() {
            debug!("Search input after shutdown ignored");
        }
    }

    pub fn results(&self) -> watch::Receiver<Option<SearchOutcome>> {
        self.results.clone()
    }

    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Search task failed");
        }
    }
}

async fn debounce(
    api: Arc<dyn DashboardApi>,
    window: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    results: watch::Sender<Option<SearchOutcome>>,
    token: CancellationToken,
) {
    let quiet = tokio::time::sleep(window);
    tokio::pin!(quiet);
    let mut pending: Option<String> = None;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            text = input.recv() => {
                let Some(text) = text else { break };
                let query = text.trim();
                if query.is_empty() {
                    if pending.take().is_some() {
                        debug!("Pending search dropped");
                    }
                } else {
                    pending = Some(query.to_string());
                    quiet.as_mut().reset(Instant::now() + window);
                }
            }
            _ = &mut quiet, if pending.is_some() => {
                let Some(query) = pending.take() else { continue };
                debug!(%query, "Search dispatched");
                let result = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    result = api.search(&query) => result,
                };
                debug!(%query, total = result.total, "Search settled");
                results.send_replace(Some(SearchOutcome { query, result }));
            }
        }
    }
    debug!("Search debouncer stopped");
}
