//! Domain DTOs for the followers endpoint.
//!
//! # Design
//! `Follower` mirrors the mock-server's schema but is defined independently;
//! the integration tests catch drift between the two crates. Only the two
//! fields the client needs are declared, so serde ignores the rest of the
//! GitHub payload while still rejecting elements that miss either field.

use serde::{Deserialize, Serialize};

/// A single account returned by `GET /users/{username}/followers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Follower {
    pub login: String,
    pub avatar_url: String,
}
