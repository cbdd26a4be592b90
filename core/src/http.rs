//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. `FollowerClient` builds an
//! `HttpRequest` and parses an `HttpResponse`; a `Transport` sits in between
//! and is the only piece that touches the network. The followers pipeline
//! only ever issues GETs, so the request carries no method or body.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data. The body is kept as raw bytes;
/// whether they are valid UTF-8 or JSON is for the parser to decide.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for any status in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
