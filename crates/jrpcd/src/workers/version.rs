//! `version`: reports the configured application version.

use serde::Deserialize;
use serde_json::Value;

use jrpc_dispatch::{Fault, Handler, Validate};

use crate::context::AppContext;

/// Takes no parameters; any object payload is accepted and ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionWorker {}

impl Validate for VersionWorker {
    fn is_valid(&self) -> bool {
        true
    }
}

impl Handler<AppContext> for VersionWorker {
    fn execute(&self, context: &AppContext) -> Result<Value, Fault> {
        Ok(Value::String(context.app_version().to_owned()))
    }
}
