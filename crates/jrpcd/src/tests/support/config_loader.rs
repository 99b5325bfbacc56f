//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use jrpc_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader that binds to an ephemeral loopback port with a short deadline.
pub struct TestConfigLoader {
    request_timeout_secs: u64,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_timeout_secs: 5,
        }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            listen_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            request_timeout_secs: self.request_timeout_secs,
            app_version: "1.2.3".to_owned(),
            ..Config::default()
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config())
    }
}

/// Loader that intentionally fails by passing an unparseable listen address.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("jrpcd"),
            OsString::from("--listen-address"),
            OsString::from("not-an-address"),
        ];
        Config::load_from_iter(args)
    }
}
