//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!    ┌──────────────────────────────────────────────────┐
//!    │               Connection Task                    │
//!    │                                                  │
//!    │  ┌──────────────┐            ┌──────────────┐    │
//!    │  │  FramedRead  │            │ FramedWrite  │    │
//!    │  └──────┬───────┘            └──────▲───────┘    │
//!    │         ▼                           │            │
//!    │    tokio::select! ──▶ [dispatch] ───┤            │
//!    │         ▲                           │            │
//!    │         └──── [Outbound queue] ─────┘            │
//!    │               (DELIVERY from peers)              │
//!    └──────────────────────────────────────────────────┘
//! ```
//!
//! The task is the only writer of its socket, so lines never interleave.

mod error_handling;

use error_handling::{TransportErrorAction, classify_transport_error, log_handler_error};

use crate::handlers::{self, Context};
use crate::state::{ConnectionId, Hub, Outbound, Session};
use crate::telemetry::spans;
use futures_util::{SinkExt, StreamExt};
use relay_proto::{Command, ProtocolError, RelayCodec, Reply};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

type Reader = FramedRead<OwnedReadHalf, RelayCodec>;
type Writer = FramedWrite<OwnedWriteHalf, RelayCodec>;

/// Why a connection ended without a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disconnect {
    PeerClosed,
    IdleTimeout,
    Evicted,
    Shutdown,
}

impl Disconnect {
    fn as_str(self) -> &'static str {
        match self {
            Self::PeerClosed => "peer closed",
            Self::IdleTimeout => "idle timeout",
            Self::Evicted => "SendQ exceeded",
            Self::Shutdown => "server shutdown",
        }
    }
}

/// A client connection handler.
pub struct Connection {
    id: ConnectionId,
    addr: SocketAddr,
    hub: Arc<Hub>,
    stream: TcpStream,
}

impl Connection {
    pub fn new(id: ConnectionId, stream: TcpStream, addr: SocketAddr, hub: Arc<Hub>) -> Self {
        Self {
            id,
            addr,
            hub,
            stream,
        }
    }

    /// Serve the client until it leaves, is evicted, or the server stops.
    ///
    /// The handle (if any) is released before this returns, whatever the
    /// reason for the disconnect.
    pub async fn run(self) -> Result<(), ProtocolError> {
        let Self {
            id,
            addr,
            hub,
            stream,
        } = self;

        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::new(
            read_half,
            RelayCodec::with_max_len(hub.limits.max_line_length),
        );
        let mut writer = FramedWrite::new(write_half, RelayCodec::new());

        let closer = hub.lifecycle.connection_token();
        let (outbound, mut queue) = Outbound::channel(id, hub.limits.send_queue, closer.clone());
        let mut session = Session::new(id, outbound);

        let open = hub.stats.connection_opened();
        info!(open, "Client connected");

        let result = tokio::select! {
            result = serve(&hub, &mut session, &mut reader, &mut writer, &mut queue) => result,
            _ = closer.cancelled() => Ok(if hub.lifecycle.is_shutting_down() {
                Disconnect::Shutdown
            } else {
                Disconnect::Evicted
            }),
        };

        if let Some(handle) = session.handle()
            && hub.directory.release(handle, id)
        {
            info!(handle, users = hub.directory.len(), "Handle released");
        }
        closer.cancel();
        queue.close();
        hub.stats.connection_closed();

        match result {
            Ok(Disconnect::Evicted) => {
                warn!(reason = Disconnect::Evicted.as_str(), %addr, "Client disconnected");
                Ok(())
            }
            Ok(reason) => {
                info!(reason = reason.as_str(), %addr, "Client disconnected");
                Ok(())
            }
            Err(e) => match classify_transport_error(&e) {
                TransportErrorAction::PeerReset => {
                    debug!(error = %e, "Client connection reset");
                    Ok(())
                }
                TransportErrorAction::Fatal => Err(e),
            },
        }
    }
}

/// Read, dispatch and write until the peer goes away or idles out.
async fn serve(
    hub: &Hub,
    session: &mut Session,
    reader: &mut Reader,
    writer: &mut Writer,
    queue: &mut mpsc::Receiver<Arc<Reply>>,
) -> Result<Disconnect, ProtocolError> {
    let idle = hub.idle_timeout;
    let mut deadline = idle.map(|d| Instant::now() + d);

    loop {
        tokio::select! {
            biased;
            frame = reader.next() => {
                let command = match frame {
                    Some(Ok(command)) => command,
                    Some(Err(e)) => return Err(e),
                    None => return Ok(Disconnect::PeerClosed),
                };
                if let Some(idle) = idle {
                    deadline = Some(Instant::now() + idle);
                }

                let reply = handle_command(hub, session, command);

                // Deliveries queued before this reply go out first.
                while let Ok(queued) = queue.try_recv() {
                    writer.feed(queued.as_ref()).await?;
                }
                writer.send(&reply).await?;
            }
            Some(queued) = queue.recv() => {
                writer.send(queued.as_ref()).await?;
            }
            _ = idle_expired(deadline) => return Ok(Disconnect::IdleTimeout),
        }
    }
}

fn handle_command(hub: &Hub, session: &mut Session, command: Command) -> Reply {
    let span = spans::command(command.name(), session.handle());
    let _enter = span.enter();

    let mut ctx = Context::new(hub, session);
    match handlers::dispatch(&mut ctx, command) {
        Ok(reply) => reply,
        Err(err) => {
            log_handler_error(&err);
            err.to_reply()
        }
    }
}

async fn idle_expired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
