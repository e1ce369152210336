//! Propagation of like/unlike changes to the remote service.
//!
//! The remote store is a downstream replica: it is notified of every change
//! but never read back. Notifications are best effort, at most once, and
//! their failures are only logged.

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use reqwest::Client;
use tokio::{runtime::Handle, task::JoinHandle};

use crate::{types::LikeRequest, warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            LikeAction::Like => "/like",
            LikeAction::Unlike => "/unlike",
        }
    }
}

/// Receives like/unlike notifications.
///
/// `dispatch` must return without waiting for the remote side.
pub trait LikeSink: Send + Sync {
    fn dispatch(&self, action: LikeAction, request: LikeRequest);
}

/// Posts notifications as JSON to `{base_url}/like` and `{base_url}/unlike`,
/// each one on its own detached tokio task.
///
/// Outside a tokio runtime there is nowhere to run the task; the
/// notification is dropped with a warning.
pub struct HttpLikeSink {
    client: Client,
    base_url: String,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpLikeSink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Gives notifications still in flight up to `timeout` to finish.
    ///
    /// Only meant for process shutdown, so a short-lived command does not
    /// drop its last notification. Whatever is still running afterwards is
    /// abandoned.
    pub async fn drain(&self, timeout: Duration) {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };

        let deadline = Instant::now() + timeout;
        for handle in handles {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if tokio::time::timeout(remaining, handle).await.is_err() {
                warning!("Gave up waiting for a like/unlike notification");
            }
        }
    }
}

impl LikeSink for HttpLikeSink {
    fn dispatch(&self, action: LikeAction, request: LikeRequest) {
        let url = format!("{}{}", self.base_url, action.endpoint());
        let Ok(runtime) = Handle::try_current() else {
            warning!("No async runtime, dropping {} notification for {}", url, request.item);
            return;
        };
        let client = self.client.clone();

        let handle = runtime.spawn(async move {
            let result = client
                .post(&url)
                .json(&request)
                .send()
                .await
                .and_then(|res| res.error_for_status());

            if let Err(e) = result {
                warning!("Error updating liked items: {}", e);
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }
}
