//! Log output format selection.
//!
//! Accepted spellings are case-insensitive on the command line and in
//! `JRPC_LOG_FORMAT`; configuration files use the lowercase names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Shape of the lines the daemon writes to stderr.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event.
    #[default]
    Json,
    /// Compact human-oriented text.
    Compact,
}

impl LogFormat {
    /// Whether events are emitted as machine-readable JSON.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when text names no known [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
