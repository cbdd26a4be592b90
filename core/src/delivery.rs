//! Hands fetch results to the presentation layer.
//!
//! # Design
//! The presentation layer owns an `mpsc` receiver and drains it on whatever
//! task or thread it renders from. `spawn_fetch` runs the request on the
//! tokio runtime and sends exactly one `FollowerPage` to that channel once the
//! request has finished, failed or been cancelled. The channel is the context
//! switch: nothing presentation-facing ever runs on the fetching task.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::FollowerClient;
use crate::error::{GithubFollowerError, TransportError};
use crate::transport::Transport;
use crate::types::Follower;

/// The outcome of one `spawn_fetch`, tagged with what was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowerPage {
    pub username: String,
    pub page: u32,
    pub result: Result<Vec<Follower>, GithubFollowerError>,
}

/// Handle to an in-flight fetch.
///
/// Dropping the handle does not cancel the fetch; the page is still delivered.
#[derive(Debug)]
pub struct FetchHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl FetchHandle {
    /// Abandon the request. If it has not finished yet, the delivered page
    /// carries `UnableToComplete` instead of a result.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait until the page has been handed to the channel.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "fetch task did not complete");
        }
    }
}

/// Fetch one page on the current tokio runtime and send it to `deliver_to`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_fetch<T>(
    client: FollowerClient<T>,
    username: impl Into<String>,
    page: u32,
    deliver_to: mpsc::UnboundedSender<FollowerPage>,
) -> FetchHandle
where
    T: Transport + 'static,
{
    let username = username.into();
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let result = tokio::select! {
            result = client.fetch_followers(&username, page) => result,
            Ok(()) = cancel_rx => {
                debug!(%username, page, "fetch cancelled");
                Err(GithubFollowerError::from(TransportError::Cancelled))
            }
        };

        if deliver_to.send(FollowerPage { username, page, result }).is_err() {
            debug!("receiver dropped before the page was delivered");
        }
    });

    FetchHandle {
        cancel: Some(cancel_tx),
        task,
    }
}
