//! State management module.
//!
//! Contains the Hub (shared server state) and the per-connection Session.

mod directory;
mod hub;
mod id;
mod lifecycle;
mod session;
mod stats;

pub use directory::{Claim, Directory};
pub use hub::Hub;
pub use id::{ConnectionId, ConnectionIdGenerator};
pub use lifecycle::LifecycleManager;
pub use session::{Outbound, Session, SessionState};
pub use stats::{StatsManager, StatsSnapshot};
