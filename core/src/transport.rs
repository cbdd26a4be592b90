//! The I/O seam between `FollowerClient` and the network.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and returns whatever the server
//! answered, including 4xx/5xx statuses. Only failures that leave no status
//! line at all are reported as `TransportError`. Tests plug in their own
//! implementations; production code uses `UreqTransport`.

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single HTTP GET.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Blocking `ureq` agent driven from the tokio blocking pool.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data and the client decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| {
                if e.is_cancelled() {
                    TransportError::Cancelled
                } else {
                    TransportError::Other(e.to_string())
                }
            })?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = agent.get(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = builder.call().map_err(map_ureq_error)?;

    // Once a status line has arrived the exchange is a response, even if
    // the body cannot be read in full.
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().unwrap_or_else(|e| {
        warn!(status, error = %e, "could not read response body");
        Vec::new()
    });

    debug!(status, bytes = body.len(), "response received");
    Ok(HttpResponse { status, body })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connect(err.to_string())
        }
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => TransportError::Timeout,
        ureq::Error::Io(io) => TransportError::Connect(io.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}
