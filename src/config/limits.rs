//! Per-connection resource limits.

use relay_proto::DEFAULT_MAX_LINE_LEN;
use serde::Deserialize;

/// Per-connection resource limits.
///
/// These bound how much memory a single slow or hostile client can pin.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum request line length in bytes, terminator included (default: 8192).
    /// Longer lines are discarded and answered with `BAD-RQST-HDR`.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Outbound queue depth per connection (default: 256).
    /// A recipient whose queue overflows is disconnected.
    #[serde(default = "default_send_queue")]
    pub send_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            send_queue: default_send_queue(),
        }
    }
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_send_queue() -> usize {
    256
}
