//! Client request parsing.
//!
//! [`Command::parse`] turns one delimiter-stripped line into a typed request.
//! Parsing is pure: it never consults server state, so a well-formed
//! `HELLO-FROM` for a handle that is already taken still parses as
//! [`Command::Hello`].

use std::fmt;

use crate::handle::HandleExt;

/// A request verb the server recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `HELLO-FROM <handle>`
    HelloFrom,
    /// `LIST`
    List,
    /// `SEND <dest> <body>`
    Send,
}

impl Verb {
    /// The keyword as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HelloFrom => "HELLO-FROM",
            Self::List => "LIST",
            Self::Send => "SEND",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "HELLO-FROM" => Some(Self::HelloFrom),
            "LIST" => Some(Self::List),
            "SEND" => Some(Self::Send),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a request line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Malformed {
    /// Unknown keyword, empty line, or a line the framer could not decode.
    Header,
    /// Recognised keyword with arguments of the wrong shape.
    Body(Verb),
}

/// A parsed client request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Claim a handle.
    Hello(String),
    /// Ask for the handles currently online.
    List,
    /// Route `body` to the client holding `dest`.
    Send {
        /// Destination handle.
        dest: String,
        /// Message body, relayed verbatim.
        body: String,
    },
    /// The line was not a well-formed request.
    Malformed(Malformed),
}

impl Command {
    /// Parse a single request line (without its trailing `\n`).
    ///
    /// ```
    /// use relay_proto::{Command, Malformed, Verb};
    ///
    /// assert_eq!(
    ///     Command::parse("SEND bob hi there"),
    ///     Command::Send { dest: "bob".into(), body: "hi there".into() },
    /// );
    /// assert_eq!(Command::parse("SEND bob "), Command::Malformed(Malformed::Body(Verb::Send)));
    /// assert_eq!(Command::parse("PING"), Command::Malformed(Malformed::Header));
    /// ```
    pub fn parse(line: &str) -> Self {
        let (keyword, rest) = match line.split_once(' ') {
            Some((keyword, rest)) => (keyword, Some(rest)),
            None => (line, None),
        };

        match Verb::from_keyword(keyword) {
            Some(Verb::HelloFrom) => parse_hello(rest),
            // Trailing content after LIST is tolerated.
            Some(Verb::List) => Self::List,
            Some(Verb::Send) => parse_send(rest),
            None => Self::Malformed(Malformed::Header),
        }
    }

    /// The verb this request was recognised as, if any.
    pub fn verb(&self) -> Option<Verb> {
        match self {
            Self::Hello(_) => Some(Verb::HelloFrom),
            Self::List => Some(Verb::List),
            Self::Send { .. } => Some(Verb::Send),
            Self::Malformed(Malformed::Body(verb)) => Some(*verb),
            Self::Malformed(Malformed::Header) => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        self.verb().map_or("UNKNOWN", |verb| verb.as_str())
    }
}

fn parse_hello(rest: Option<&str>) -> Command {
    let malformed = Command::Malformed(Malformed::Body(Verb::HelloFrom));
    let Some(rest) = rest else {
        return malformed;
    };

    let handle = rest.trim();
    if handle.is_valid_handle() {
        Command::Hello(handle.to_owned())
    } else {
        malformed
    }
}

fn parse_send(rest: Option<&str>) -> Command {
    let malformed = Command::Malformed(Malformed::Body(Verb::Send));
    let Some((dest, body)) = rest.and_then(|rest| rest.split_once(' ')) else {
        return malformed;
    };

    if body.trim().is_empty() {
        return malformed;
    }

    Command::Send {
        dest: dest.to_owned(),
        body: body.to_owned(),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hello(handle) => write!(f, "HELLO-FROM {handle}"),
            Self::List => f.write_str("LIST"),
            Self::Send { dest, body } => write!(f, "SEND {dest} {body}"),
            Self::Malformed(Malformed::Header) => f.write_str("<malformed>"),
            Self::Malformed(Malformed::Body(verb)) => write!(f, "{verb} <malformed>"),
        }
    }
}
