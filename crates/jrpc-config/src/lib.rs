//! Shared configuration for the JSON-RPC dispatcher daemon.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, an optional TOML
//! file (`--config-path` or `JRPC_CONFIG_PATH`), `JRPC_*` environment
//! variables, and finally command-line flags, with later layers winning.
//!
//! The dispatcher core consumes only the listen address and the request
//! timeout. The remaining fields feed telemetry, the transport body limit and
//! the execution context handed to workers.

mod defaults;
mod logging;

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_HTTP_PORT, DEFAULT_LOG_FILTER, DEFAULT_MAX_BODY_BYTES, DEFAULT_REQUEST_TIMEOUT_SECS,
    default_app_version, default_listen_address, default_log_filter, default_log_filter_string,
    default_log_format, default_max_body_bytes, default_request_timeout_secs,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "JRPC")]
pub struct Config {
    /// Socket address the HTTP endpoint binds to.
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Global per-request deadline in seconds. Zero waits indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Version string reported to clients by the `version` method.
    #[serde(default = "default_app_version")]
    pub app_version: String,
    /// Largest request body accepted by the transport.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Tracing filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            request_timeout_secs: default_request_timeout_secs(),
            app_version: default_app_version(),
            max_body_bytes: default_max_body_bytes(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Address the HTTP listener binds to.
    #[must_use]
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Deadline applied to each request. [`Duration::ZERO`] disables it.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Version reported by the `version` method.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Maximum accepted request body size in bytes.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Structured log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
