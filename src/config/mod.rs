//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, server settings and file loading
//! - [`listen`]: Listener address configuration
//! - [`limits`]: Per-connection resource limits
//! - [`validation`]: Startup checks over a loaded configuration

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};
