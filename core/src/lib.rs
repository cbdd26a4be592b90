//! Client core for fetching a GitHub user's followers.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. A `Transport` performs the actual round-trip, so the
//! request/response logic stays deterministic and the I/O can be swapped out
//! in tests.
//!
//! # Design
//! - `FollowerClient` is stateless. It holds a base URL, a page size and a
//!   transport, and is cheap to clone across tasks.
//! - The fetch is split into `build_get_followers` (produces the request) and
//!   `parse_get_followers` (consumes the response); `fetch_followers` wires the
//!   two together through the transport.
//! - Every failure resolves to one `GithubFollowerError`, whose `Display` is
//!   the fixed user-facing message.
//! - `spawn_fetch` hands the result to a channel owned by the presentation
//!   layer, exactly once.

pub mod alert;
pub mod client;
pub mod delivery;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use alert::Alert;
pub use client::{FollowerClient, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
pub use delivery::{spawn_fetch, FetchHandle, FollowerPage};
pub use error::{GithubFollowerError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::Follower;
