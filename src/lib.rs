//! relayd - a line-based private message relay.
//!
//! Clients connect over TCP, claim a handle with `HELLO-FROM`, list who is
//! online with `LIST` and exchange private messages with `SEND`. The wire
//! format lives in the `relay-proto` crate; this crate holds the server.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use network::Gateway;
pub use state::Hub;
