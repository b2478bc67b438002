//! Per-connection session state.
//!
//! A session starts unauthenticated and moves to authenticated exactly once,
//! when a `HELLO-FROM` claim succeeds. The handle lives inside the
//! authenticated state so it can never be read before it exists.
//!
//! ```text
//! ┌───────────────────┐   claim granted   ┌──────────────────────────┐
//! │  Unauthenticated  │ ────────────────▶ │  Authenticated { handle } │
//! └───────────────────┘                   └──────────────────────────┘
//! ```

use crate::error::DeliveryError;
use crate::state::ConnectionId;
use relay_proto::Reply;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

/// Authentication state of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { handle: String },
}

impl SessionState {
    /// The claimed handle, if authenticated.
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated { handle } => Some(handle),
        }
    }
}

/// Write side of a connection as seen by other tasks.
///
/// Cloned into the directory on a successful claim. Deliveries are queued
/// without blocking; a recipient whose queue is full is disconnected.
#[derive(Debug, Clone)]
pub struct Outbound {
    id: ConnectionId,
    tx: mpsc::Sender<Arc<Reply>>,
    closer: CancellationToken,
}

impl Outbound {
    /// Create the sending half and the receiver the connection task drains.
    ///
    /// `capacity` is clamped to at least one slot.
    pub fn channel(
        id: ConnectionId,
        capacity: usize,
        closer: CancellationToken,
    ) -> (Self, mpsc::Receiver<Arc<Reply>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { id, tx, closer }, rx)
    }

    /// Connection this queue belongs to.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a reply for the connection's writer.
    pub fn deliver(&self, reply: Arc<Reply>) -> Result<(), DeliveryError> {
        if self.closer.is_cancelled() {
            return Err(DeliveryError::Closed);
        }

        match self.tx.try_send(reply) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!(conn = %self.id, "SendQ exceeded, disconnecting");
                self.closer.cancel();
                Err(DeliveryError::QueueFull)
            }
            Err(TrySendError::Closed(_)) => Err(DeliveryError::Closed),
        }
    }

    /// Whether the connection is gone or going away.
    pub fn is_closed(&self) -> bool {
        self.closer.is_cancelled() || self.tx.is_closed()
    }
}

/// State owned by a single connection task.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    state: SessionState,
    outbound: Outbound,
}

impl Session {
    pub fn new(id: ConnectionId, outbound: Outbound) -> Self {
        Self {
            id,
            state: SessionState::Unauthenticated,
            outbound,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The claimed handle, if authenticated.
    pub fn handle(&self) -> Option<&str> {
        self.state.handle()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn outbound(&self) -> &Outbound {
        &self.outbound
    }

    /// Record a granted claim. Returns false if the session already had one.
    pub(crate) fn authenticate(&mut self, handle: String) -> bool {
        match self.state {
            SessionState::Unauthenticated => {
                self.state = SessionState::Authenticated { handle };
                true
            }
            SessionState::Authenticated { .. } => false,
        }
    }
}
