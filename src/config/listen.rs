//! Network listener configuration.

use serde::Deserialize;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListenConfig {
    /// Host or IP address to bind to (default: "0.0.0.0").
    #[serde(default = "default_address")]
    pub address: String,
    /// TCP port to listen on (default: 5378). Port 0 picks an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

impl ListenConfig {
    /// `host:port` form, used for logging.
    pub fn display_addr(&self) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

pub(super) fn default_address() -> String {
    "0.0.0.0".to_string()
}

pub(super) fn default_port() -> u16 {
    5378
}
