//! Server statistics tracking.
//!
//! Lock-free counters updated by connection tasks and logged at shutdown.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub connections_total: usize,
    pub connections_open: usize,
    pub peak_connections: usize,
    pub messages_delivered: u64,
    pub uptime: Duration,
}

/// Server statistics counters.
pub struct StatsManager {
    /// Total connections since startup.
    connections_total: AtomicUsize,
    /// Currently open connections, authenticated or not.
    connections_open: AtomicUsize,
    /// Peak concurrent connections.
    peak_connections: AtomicUsize,
    /// DELIVERY lines queued to recipients.
    messages_delivered: AtomicU64,
    /// Server startup time.
    started_at: Instant,
}

impl StatsManager {
    /// Create a new stats manager.
    pub fn new() -> Self {
        Self {
            connections_total: AtomicUsize::new(0),
            connections_open: AtomicUsize::new(0),
            peak_connections: AtomicUsize::new(0),
            messages_delivered: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Record an accepted connection. Returns the new open count.
    pub fn connection_opened(&self) -> usize {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        let open = self.connections_open.fetch_add(1, Ordering::Relaxed) + 1;

        let mut peak = self.peak_connections.load(Ordering::Relaxed);
        while open > peak {
            match self.peak_connections.compare_exchange_weak(
                peak,
                open,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => peak = current,
            }
        }

        open
    }

    /// Record a finished connection. Returns the new open count.
    pub fn connection_closed(&self) -> usize {
        self.connections_open
            .fetch_sub(1, Ordering::Relaxed)
            .saturating_sub(1)
    }

    /// Record a queued delivery.
    pub fn message_delivered(&self) {
        self.messages_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_open: self.connections_open.load(Ordering::Relaxed),
            peak_connections: self.peak_connections.load(Ordering::Relaxed),
            messages_delivered: self.messages_delivered.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::new()
    }
}
