//! Error classification for connection tasks.

use crate::error::HandlerError;
use relay_proto::ProtocolError;
use std::io::ErrorKind;
use tracing::{debug, warn};

/// What to do about a failed read or write.
pub(super) enum TransportErrorAction {
    /// The peer went away mid-stream. Not worth more than a debug line.
    PeerReset,
    /// Anything else: report it.
    Fatal,
}

/// Classify a transport error into an actionable category.
pub(super) fn classify_transport_error(e: &ProtocolError) -> TransportErrorAction {
    match e {
        ProtocolError::Io(io)
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) =>
        {
            TransportErrorAction::PeerReset
        }
        _ => TransportErrorAction::Fatal,
    }
}

/// Log a rejected request at a level matching its cause.
pub(super) fn log_handler_error(err: &HandlerError) {
    match err {
        HandlerError::Undeliverable { .. } => {
            warn!(code = err.error_code(), error = %err, "Delivery failed");
        }
        _ => debug!(code = err.error_code(), error = %err, "Request rejected"),
    }
}
