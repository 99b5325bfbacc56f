//! `status`: version and uptime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use jrpc_dispatch::{Fault, Handler, Validate};

use crate::context::AppContext;

/// Takes no parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusWorker {}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    version: &'a str,
    uptime_secs: u64,
}

impl Validate for StatusWorker {
    fn is_valid(&self) -> bool {
        true
    }
}

impl Handler<AppContext> for StatusWorker {
    fn execute(&self, context: &AppContext) -> Result<Value, Fault> {
        let report = StatusReport {
            version: context.app_version(),
            uptime_secs: context.uptime().as_secs(),
        };
        serde_json::to_value(report).map_err(|_| Fault::internal())
    }
}
