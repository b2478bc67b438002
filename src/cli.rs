//! Command-line arguments.
//!
//! Flags override the configuration file, which overrides built-in defaults.

use crate::config::{Config, ConfigError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "relayd", version, about = "Line-based private message relay")]
pub struct Args {
    /// Address to bind
    #[arg(short, long, env = "RELAYD_ADDRESS")]
    pub address: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RELAYD_PORT")]
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "RELAYD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of authenticated clients
    #[arg(long, env = "RELAYD_MAX_USERS")]
    pub max_users: Option<usize>,
}

impl Args {
    /// Load the config file (if any) and apply flag overrides.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(address) = self.address {
            config.listen.address = address;
        }
        if let Some(port) = self.port {
            config.listen.port = port;
        }
        if let Some(max_users) = self.max_users {
            config.server.max_users = max_users;
        }

        Ok(config)
    }
}
