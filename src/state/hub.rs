//! The Hub - shared state for the relay server.

use crate::config::{Config, LimitsConfig};
use crate::state::{ConnectionIdGenerator, Directory, LifecycleManager, StatsManager};
use std::time::Duration;

/// Shared server state, handed to every connection task behind an `Arc`.
pub struct Hub {
    /// Claimed handles and their outbound queues.
    pub directory: Directory,

    /// Shutdown signal and task tracking.
    pub lifecycle: LifecycleManager,

    pub stats: StatsManager,

    /// ID generator for new connections.
    pub ids: ConnectionIdGenerator,

    /// Per-connection limits.
    pub limits: LimitsConfig,

    /// Close connections silent for this long.
    pub idle_timeout: Option<Duration>,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            directory: Directory::new(config.server.max_users),
            lifecycle: LifecycleManager::new(),
            stats: StatsManager::new(),
            ids: ConnectionIdGenerator::new(),
            limits: config.limits.clone(),
            idle_timeout: config.server.idle_timeout(),
        }
    }
}
