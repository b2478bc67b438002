//! Server lifecycle: shutdown signalling and connection task tracking.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Owns the shutdown signal and the set of running connection tasks.
///
/// Every connection gets a child of the root token, so cancelling the root
/// closes all of them while a single connection can still be closed on its
/// own.
pub struct LifecycleManager {
    shutdown: CancellationToken,
    tasks: TaskTracker,
    requested: AtomicBool,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self {
            shutdown: CancellationToken::new(),
            tasks: TaskTracker::new(),
            requested: AtomicBool::new(false),
        }
    }

    /// Begin shutdown. Returns true only for the call that started it.
    pub fn shutdown(&self) -> bool {
        if self.requested.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::info!("Shutdown requested");
        self.tasks.close();
        self.shutdown.cancel();
        true
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Resolves once shutdown has begun.
    pub async fn stopped(&self) {
        self.shutdown.cancelled().await
    }

    /// Token for a new connection, cancelled on shutdown.
    pub fn connection_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Spawn a tracked task.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tasks.spawn(task)
    }

    /// Number of tracked tasks still running.
    pub fn running(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every tracked task to finish. Only returns after shutdown.
    pub async fn drained(&self) {
        self.tasks.wait().await
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
