//! Stateless request builder, response parser and fetcher for the followers API.
//!
//! # Design
//! `FollowerClient` holds a base URL, a page size and a transport, and carries
//! no mutable state between calls. `build_get_followers` produces an
//! `HttpRequest`, `parse_get_followers` consumes an `HttpResponse`, and
//! `fetch_followers` runs exactly one round-trip through the transport in
//! between. Nothing is retried; every failure is returned to the caller.

use tracing::{debug, warn};
use url::Url;

use crate::error::GithubFollowerError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Follower;

/// Public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Followers requested per page.
pub const DEFAULT_PER_PAGE: u32 = 100;

const USER_AGENT: &str = "github-followers-rust";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Stateless client for `GET /users/{username}/followers`.
#[derive(Debug, Clone)]
pub struct FollowerClient<T> {
    base_url: String,
    per_page: u32,
    transport: T,
}

impl FollowerClient<UreqTransport> {
    /// Client for the public GitHub API using the default `ureq` transport.
    pub fn github() -> Self {
        Self::new(DEFAULT_BASE_URL, UreqTransport::new())
    }
}

impl<T: Transport> FollowerClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page: DEFAULT_PER_PAGE,
            transport,
        }
    }

    /// Overrides the page size. Zero is raised to one.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Fetch one page of `username`'s followers, in server order.
    ///
    /// Invalid input fails with `InvalidUsername` before the transport is
    /// touched. A transport failure is `UnableToComplete`, a non-2xx status is
    /// `InvalidResponse` and an undecodable body is `InvalidData`.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_followers(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<Follower>, GithubFollowerError> {
        let request = self.build_get_followers(username, page)?;
        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(error = %e, "transport failed");
            GithubFollowerError::from(e)
        })?;
        self.parse_get_followers(response)
    }

    pub fn build_get_followers(
        &self,
        username: &str,
        page: u32,
    ) -> Result<HttpRequest, GithubFollowerError> {
        let url = self.followers_url(username, page).inspect_err(|_| {
            warn!(username, page, "could not build followers request");
        })?;
        debug!(%url, "built followers request");
        Ok(HttpRequest {
            url,
            headers: vec![
                ("user-agent".to_string(), USER_AGENT.to_string()),
                ("accept".to_string(), ACCEPT.to_string()),
            ],
        })
    }

    pub fn parse_get_followers(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Follower>, GithubFollowerError> {
        if !response.is_success() {
            warn!(status = response.status, "unexpected response status");
            return Err(GithubFollowerError::InvalidResponse);
        }
        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(error = %e, "could not decode followers");
            GithubFollowerError::InvalidData
        })
    }

    fn followers_url(&self, username: &str, page: u32) -> Result<String, GithubFollowerError> {
        if !is_valid_username(username) || page == 0 {
            return Err(GithubFollowerError::InvalidUsername);
        }

        let mut url = Url::parse(&self.base_url).map_err(|_| GithubFollowerError::InvalidUsername)?;
        url.path_segments_mut()
            .map_err(|_| GithubFollowerError::InvalidUsername)?
            .pop_if_empty()
            .extend(["users", username, "followers"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url.into())
    }
}

/// Usernames are encoded as a single path segment. Whitespace, control
/// characters and dot segments cannot be.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username != "."
        && username != ".."
        && !username.chars().any(|c| c.is_whitespace() || c.is_control())
}
