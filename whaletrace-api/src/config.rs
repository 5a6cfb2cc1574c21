//! API server configuration

use crate::error::{ApiError, ApiResult};
use std::net::SocketAddr;
use std::time::Duration;

/// HTTP server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind.
    pub bind_host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whole-request timeout applied by the router.
    pub request_timeout: Duration,
    /// CORS allowed origin; `*` permits any origin.
    pub cors_allow_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(30),
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `WHALETRACE_API_BIND`: bind interface (default: 0.0.0.0)
    /// - `PORT` or `WHALETRACE_API_PORT`: listen port (default: 3000)
    /// - `WHALETRACE_REQUEST_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `WHALETRACE_CORS_ORIGIN`: allowed CORS origin (default: *)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_host: std::env::var("WHALETRACE_API_BIND").unwrap_or(defaults.bind_host),
            port: std::env::var("PORT")
                .ok()
                .or_else(|| std::env::var("WHALETRACE_API_PORT").ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout: std::env::var("WHALETRACE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            cors_allow_origin: std::env::var("WHALETRACE_CORS_ORIGIN")
                .unwrap_or(defaults.cors_allow_origin),
        }
    }

    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
