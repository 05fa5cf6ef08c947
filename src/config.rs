//! Statistics endpoint configuration.

use std::env;

/// Environment variable holding the statistics endpoint URL.
pub const STATS_ENDPOINT_VAR: &str = "STATS_ENDPOINT";

/// Endpoint used when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/runs";

/// Supplies the statistics endpoint URL.
///
/// Read once per delivery attempt, so the endpoint can change without a
/// restart.
pub trait EndpointProvider: Send + Sync {
    fn stats_endpoint(&self) -> String;
}

/// Fixed endpoint, mostly useful in tests and embedders with their own
/// configuration layer.
impl EndpointProvider for String {
    fn stats_endpoint(&self) -> String {
        self.clone()
    }
}

/// Reads the endpoint from the process environment on every call.
pub struct EnvEndpointProvider {
    var: String,
    default: String,
}

impl EnvEndpointProvider {
    pub fn new() -> Self {
        Self::with_var(STATS_ENDPOINT_VAR)
    }

    /// Read from a non-standard variable name.
    pub fn with_var(var: &str) -> Self {
        Self {
            var: var.to_string(),
            default: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for EnvEndpointProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointProvider for EnvEndpointProvider {
    fn stats_endpoint(&self) -> String {
        env::var(&self.var).unwrap_or_else(|_| self.default.clone())
    }
}
