//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listening socket and spawns a tracked Connection
//! task for each accepted client until shutdown is requested.

use crate::config::ListenConfig;
use crate::network::Connection;
use crate::state::Hub;
use crate::telemetry::spans;
use anyhow::Context as _;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, debug, error, info, instrument};

/// Pause after a failed accept so descriptor exhaustion does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
}

impl Gateway {
    /// Bind the gateway to the configured address.
    pub async fn bind(listen: &ListenConfig, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let addr = listen.display_addr();
        let listener = TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(addr = %listener.local_addr()?, "Listener bound");

        Ok(Self { listener, hub })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until shutdown, then wait for every connection
    /// task to finish.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        let Self { listener, hub } = self;
        info!(capacity = hub.directory.capacity(), "Accepting connections");

        loop {
            tokio::select! {
                biased;
                _ = hub.lifecycle.stopped() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => spawn_connection(&hub, stream, addr),
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        drop(listener);
        info!(
            running = hub.lifecycle.running(),
            "Listener closed, waiting for connections"
        );
        hub.lifecycle.drained().await;

        let stats = hub.stats.snapshot();
        info!(
            connections_total = stats.connections_total,
            peak_connections = stats.peak_connections,
            messages_delivered = stats.messages_delivered,
            uptime_secs = stats.uptime.as_secs(),
            "Gateway stopped"
        );
        Ok(())
    }
}

fn spawn_connection(hub: &Arc<Hub>, stream: TcpStream, addr: SocketAddr) {
    let id = hub.ids.next();
    debug!(conn = %id, %addr, "Connection accepted");

    if let Err(e) = stream.set_nodelay(true) {
        debug!(conn = %id, error = %e, "Failed to set TCP_NODELAY");
    }

    let span = spans::connection(id, addr);
    let connection = Connection::new(id, stream, addr, Arc::clone(hub));
    hub.lifecycle.spawn(
        async move {
            if let Err(e) = connection.run().await {
                error!(error = %e, "Connection error");
            }
        }
        .instrument(span),
    );
}
