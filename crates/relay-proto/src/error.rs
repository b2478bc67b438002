//! Error types for the relay protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level protocol errors.
///
/// Only conditions that make the byte stream unusable end up here. Oversized
/// or garbled lines are reported in-band as a [`Frame`](crate::line::Frame)
/// so that the connection survives them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An outgoing line contained an embedded `\n`.
    #[error("outgoing line contains a line terminator")]
    EmbeddedNewline,
}

/// Errors encountered when parsing a server reply line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReplyParseError {
    /// The line was empty.
    #[error("empty reply")]
    Empty,

    /// The keyword is not a known reply.
    #[error("unknown reply keyword: {0}")]
    UnknownKeyword(String),

    /// The keyword is known but its arguments are missing or malformed.
    #[error("malformed {keyword} reply")]
    MissingArgument {
        /// Reply keyword whose arguments were wrong.
        keyword: &'static str,
    },
}
