//! `spawn_fetch` delivery guarantees, driven by in-process transports.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use followers_core::{
    spawn_fetch, Follower, FollowerClient, GithubFollowerError, HttpRequest, HttpResponse,
    Transport, TransportError,
};
use tokio::sync::mpsc;

const BASE_URL: &str = "http://localhost:3000";

/// Answers every request with the same status and body, counting calls.
#[derive(Clone)]
struct Canned {
    calls: Arc<AtomicUsize>,
    status: u16,
    body: &'static str,
}

impl Canned {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            status,
            body,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for Canned {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}

/// Never answers.
#[derive(Clone, Default)]
struct Stalled {
    calls: Arc<AtomicUsize>,
}

impl Transport for Stalled {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Echoes the requested URL back as a follower login.
#[derive(Clone)]
struct Echo;

impl Transport for Echo {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let body = serde_json::json!([{ "login": request.url, "avatar_url": "u" }]);
        Ok(HttpResponse {
            status: 200,
            body: body.to_string().into_bytes(),
        })
    }
}

#[tokio::test]
async fn delivers_decoded_page_once() {
    let transport = Canned::new(
        200,
        r#"[{"login":"a","avatar_url":"u1"},{"login":"b","avatar_url":"u2"}]"#,
    );
    let client = FollowerClient::new(BASE_URL, transport.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_fetch(client, "octocat", 1, tx).join().await;

    let page = rx.recv().await.unwrap();
    assert_eq!(
        page.result,
        Ok(vec![
            Follower { login: "a".to_string(), avatar_url: "u1".to_string() },
            Follower { login: "b".to_string(), avatar_url: "u2".to_string() },
        ])
    );
    assert!(rx.recv().await.is_none());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn invalid_username_is_delivered_without_a_request() {
    let transport = Canned::new(200, "[]");
    let client = FollowerClient::new(BASE_URL, transport.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_fetch(client, "two words", 1, tx).join().await;

    let page = rx.recv().await.unwrap();
    assert_eq!(page.result, Err(GithubFollowerError::InvalidUsername));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn page_zero_is_delivered_without_a_request() {
    let transport = Canned::new(200, "[]");
    let client = FollowerClient::new(BASE_URL, transport.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_fetch(client, "octocat", 0, tx).join().await;

    let page = rx.recv().await.unwrap();
    assert_eq!(page.result, Err(GithubFollowerError::InvalidUsername));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn server_error_is_delivered_as_invalid_response() {
    let client = FollowerClient::new(BASE_URL, Canned::new(500, "oops"));
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_fetch(client, "octocat", 1, tx).join().await;

    let page = rx.recv().await.unwrap();
    assert_eq!(page.result, Err(GithubFollowerError::InvalidResponse));
}

#[tokio::test]
async fn cancelling_delivers_unable_to_complete() {
    let transport = Stalled::default();
    let client = FollowerClient::new(BASE_URL, transport.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handle = spawn_fetch(client, "octocat", 1, tx);
    while transport.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    handle.cancel();
    handle.join().await;

    let page = rx.recv().await.unwrap();
    assert_eq!(page.result, Err(GithubFollowerError::UnableToComplete));
    assert!(rx.recv().await.is_none(), "no result after cancellation");
}

#[tokio::test]
async fn cancelling_a_finished_fetch_keeps_its_result() {
    let client = FollowerClient::new(BASE_URL, Canned::new(200, "[]"));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handle = spawn_fetch(client, "octocat", 1, tx);
    let page = rx.recv().await.unwrap();
    handle.cancel();
    handle.join().await;

    assert_eq!(page.result, Ok(Vec::new()));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn dropping_the_handle_does_not_cancel() {
    let client = FollowerClient::new(BASE_URL, Canned::new(200, "[]"));
    let (tx, mut rx) = mpsc::unbounded_channel();

    drop(spawn_fetch(client, "octocat", 1, tx));

    let page = rx.recv().await.unwrap();
    assert_eq!(page.result, Ok(Vec::new()));
}

#[tokio::test]
async fn dropped_receiver_does_not_fail_the_task() {
    let client = FollowerClient::new(BASE_URL, Canned::new(200, "[]"));
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    let handle = spawn_fetch(client, "octocat", 1, tx);
    handle.join().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_fetches_share_one_client() {
    let client = FollowerClient::new(BASE_URL, Echo);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handles: Vec<_> = (1..=8)
        .map(|page| spawn_fetch(client.clone(), "octocat", page, tx.clone()))
        .collect();
    drop(tx);
    for handle in handles {
        handle.join().await;
    }

    let mut pages = HashSet::new();
    while let Some(page) = rx.recv().await {
        let followers = page.result.unwrap();
        assert_eq!(followers.len(), 1);
        assert!(followers[0].login.ends_with(&format!("page={}", page.page)));
        assert!(pages.insert(page.page), "page {} delivered twice", page.page);
    }
    assert_eq!(pages, (1..=8).collect());
}
