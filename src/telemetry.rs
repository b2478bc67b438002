//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Environment variable that switches log output to JSON.
pub const JSON_ENV: &str = "RELAYD_LOG_JSON";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(JSON_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Standardized span constructors for relay observability.
pub mod spans {
    use crate::state::ConnectionId;
    use std::net::SocketAddr;
    use tracing::{Span, info_span};

    /// Create a span for a client connection.
    pub fn connection(id: ConnectionId, addr: SocketAddr) -> Span {
        info_span!("connection", conn = %id, addr = %addr)
    }

    /// Create a span for a request.
    pub fn command(name: &str, handle: Option<&str>) -> Span {
        if let Some(handle) = handle {
            info_span!("command", name = %name, handle = %handle)
        } else {
            info_span!("command", name = %name)
        }
    }
}
