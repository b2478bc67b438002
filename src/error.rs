//! Unified error handling for relayd.
//!
//! This module provides the error hierarchy for request handling and
//! delivery, with reply generation and log labeling.

use relay_proto::{Reply, Verb};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
///
/// Every variant maps to exactly one error reply; see [`HandlerError::to_reply`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unknown or misplaced command")]
    UnknownCommand,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("already authenticated")]
    AlreadyAuthenticated,

    #[error("malformed {0} arguments")]
    MalformedBody(Verb),

    #[error("handle in use: {0}")]
    HandleInUse(String),

    #[error("server full")]
    ServerFull,

    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("cannot deliver to {dest}: {source}")]
    Undeliverable {
        dest: String,
        #[source]
        source: DeliveryError,
    },
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::NotAuthenticated => "not_authenticated",
            Self::AlreadyAuthenticated => "already_authenticated",
            Self::MalformedBody(_) => "malformed_body",
            Self::HandleInUse(_) => "handle_in_use",
            Self::ServerFull => "server_full",
            Self::NoSuchUser(_) => "no_such_user",
            Self::Undeliverable { .. } => "undeliverable",
        }
    }

    /// Convert to the error reply sent back to the requesting client.
    pub fn to_reply(&self) -> Reply {
        match self {
            Self::UnknownCommand | Self::NotAuthenticated | Self::AlreadyAuthenticated => {
                Reply::BadRequestHeader
            }
            Self::MalformedBody(_) => Reply::BadRequestBody,
            Self::HandleInUse(_) => Reply::InUse,
            Self::ServerFull => Reply::Busy,
            Self::NoSuchUser(_) | Self::Undeliverable { .. } => Reply::BadDestUser,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<Reply, HandlerError>;

// ============================================================================
// Delivery Errors (outbound queue)
// ============================================================================

/// Failure to queue a reply on another connection's outbound queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The recipient stopped draining its queue and is being disconnected.
    #[error("send queue exceeded")]
    QueueFull,

    /// The recipient connection has already gone away.
    #[error("connection closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::ServerFull.error_code(), "server_full");
        assert_eq!(
            HandlerError::HandleInUse("alice".into()).error_code(),
            "handle_in_use"
        );
        assert_eq!(
            HandlerError::MalformedBody(Verb::Send).error_code(),
            "malformed_body"
        );
    }

    #[test]
    fn test_handler_error_to_reply() {
        assert_eq!(HandlerError::UnknownCommand.to_reply(), Reply::BadRequestHeader);
        assert_eq!(HandlerError::NotAuthenticated.to_reply(), Reply::BadRequestHeader);
        assert_eq!(
            HandlerError::MalformedBody(Verb::HelloFrom).to_reply(),
            Reply::BadRequestBody
        );
        assert_eq!(HandlerError::HandleInUse("a".into()).to_reply(), Reply::InUse);
        assert_eq!(HandlerError::ServerFull.to_reply(), Reply::Busy);
        assert_eq!(
            HandlerError::Undeliverable {
                dest: "bob".into(),
                source: DeliveryError::QueueFull,
            }
            .to_reply(),
            Reply::BadDestUser
        );
    }

    #[test]
    fn test_undeliverable_keeps_source() {
        use std::error::Error as _;

        let err = HandlerError::Undeliverable {
            dest: "bob".into(),
            source: DeliveryError::Closed,
        };
        assert_eq!(err.to_string(), "cannot deliver to bob: connection closed");
        assert!(err.source().is_some());
    }
}
