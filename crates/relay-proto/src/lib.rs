//! # relay-proto
//!
//! Wire protocol for the relayd chat relay.
//!
//! Every protocol unit is a single text line terminated by `\n`. Clients send
//! requests (`HELLO-FROM`, `LIST`, `SEND`), the server answers with replies
//! and pushes `DELIVERY` lines to message recipients.
//!
//! ## Parsing requests
//!
//! ```rust
//! use relay_proto::{Command, Malformed, Verb};
//!
//! assert_eq!(Command::parse("HELLO-FROM alice"), Command::Hello("alice".into()));
//! assert_eq!(Command::parse("LIST"), Command::List);
//! assert_eq!(
//!     Command::parse("HELLO-FROM al#ice"),
//!     Command::Malformed(Malformed::Body(Verb::HelloFrom)),
//! );
//! ```
//!
//! ## Building replies
//!
//! ```rust
//! use relay_proto::Reply;
//!
//! let reply = Reply::Delivery { from: "alice".into(), body: "hi".into() };
//! assert_eq!(reply.to_string(), "DELIVERY alice hi");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod handle;
pub mod reply;

#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub mod line;

pub use self::command::{Command, Malformed, Verb};
pub use self::error::{ProtocolError, ReplyParseError};
pub use self::handle::{HandleExt, ILLEGAL_HANDLE_CHARS};
pub use self::reply::Reply;

#[cfg(feature = "tokio")]
pub use self::codec::RelayCodec;
#[cfg(feature = "tokio")]
pub use self::line::{DEFAULT_MAX_LINE_LEN, Frame, LineCodec};
