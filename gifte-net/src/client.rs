//! Provider client
//!
//! Wraps one call to one provider in a fixed timeout and folds every failure
//! (timeout, transport error, non-2xx status, undecodable body) into a
//! [`ProviderResult`]. There are no retries: each provider gets one bounded
//! attempt.

use gifte_core::ProviderResult;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::{create_transport, NetError, ProviderConfig, ProviderSpec, RawResponse, SharedTransport};

/// Issues provider calls through a shared transport
#[derive(Clone)]
pub struct ProviderClient {
    transport: SharedTransport,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(transport: SharedTransport, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Client backed by reqwest, using the configured timeout
    pub fn from_config(config: &ProviderConfig) -> Result<Self, NetError> {
        Ok(Self::new(create_transport(config)?, config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one call. Always settles to a result, never an error.
    pub async fn call(&self, spec: &ProviderSpec) -> ProviderResult {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, self.transport.send(spec)).await {
            Ok(response) => response.and_then(decode),
            Err(_) => Err(NetError::Timeout(self.timeout.as_millis() as u64)),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = match outcome {
            Ok(payload) => {
                debug!("Provider {} answered in {}ms", spec.kind, elapsed_ms);
                ProviderResult::ok(spec.kind, payload)
            }
            Err(e) => {
                warn!("Provider {} failed after {}ms: {}", spec.kind, elapsed_ms, e);
                ProviderResult::failed(spec.kind, e.to_string())
            }
        };
        result.with_elapsed_ms(elapsed_ms)
    }
}

/// Longest slice of a non-2xx body kept in the failure reason
const MAX_STATUS_BODY: usize = 200;

/// Accept a 2xx response carrying JSON
fn decode(response: RawResponse) -> Result<Value, NetError> {
    if !response.is_success() {
        return Err(NetError::Status {
            status: response.status,
            body: response.body.trim().chars().take(MAX_STATUS_BODY).collect(),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| NetError::Decode(e.to_string()))
}
