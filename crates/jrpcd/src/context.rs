//! Execution context shared by every worker.

use std::time::{Duration, Instant};

use jrpc_config::Config;

/// Read-only state handed to workers by reference.
#[derive(Debug, Clone)]
pub struct AppContext {
    app_version: String,
    started_at: Instant,
}

impl AppContext {
    /// Builds a context with an explicit version, starting the uptime clock now.
    pub fn new(app_version: impl Into<String>) -> Self {
        Self {
            app_version: app_version.into(),
            started_at: Instant::now(),
        }
    }

    /// Builds the context from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_version())
    }

    /// Version string reported by the `version` method.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Time elapsed since the context was built.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
