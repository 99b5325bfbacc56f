use std::net::{Ipv4Addr, SocketAddr};

/// Default HTTP port for the dispatcher endpoint.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default per-request processing deadline in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default upper bound on an HTTP request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Address the daemon binds when none is configured.
#[must_use]
pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_HTTP_PORT))
}

/// Default request timeout, expressed in whole seconds.
#[must_use]
pub const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Default maximum request body size in bytes.
#[must_use]
pub const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Version string reported by the `version` method unless overridden.
#[must_use]
pub fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}
