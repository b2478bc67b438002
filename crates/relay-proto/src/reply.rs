//! Server replies.
//!
//! [`Reply`] covers every line the server writes: direct answers to a request
//! and unsolicited `DELIVERY` pushes. `Display` renders the wire form without
//! the trailing `\n`; the codec adds it.

use std::fmt;
use std::str::FromStr;

use crate::error::ReplyParseError;

/// A line sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reply {
    /// `HELLO <handle>`: the handle claim succeeded.
    Hello(String),
    /// `IN-USE`: the handle is already claimed.
    InUse,
    /// `BUSY`: the server is at capacity.
    Busy,
    /// `LIST-OK <h1,h2,...>`: handles currently online.
    ListOk(Vec<String>),
    /// `SEND-OK`: the message was routed.
    SendOk,
    /// `BAD-DEST-USER`: the destination is not online.
    BadDestUser,
    /// `BAD-RQST-HDR`: unknown request, or illegal in the current state.
    BadRequestHeader,
    /// `BAD-RQST-BODY`: recognised request with malformed arguments.
    BadRequestBody,
    /// `DELIVERY <from> <body>`: a routed message for this client.
    Delivery {
        /// Handle of the sender.
        from: String,
        /// Message body as sent.
        body: String,
    },
}

impl Reply {
    /// The reply keyword as it appears on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Hello(_) => "HELLO",
            Self::InUse => "IN-USE",
            Self::Busy => "BUSY",
            Self::ListOk(_) => "LIST-OK",
            Self::SendOk => "SEND-OK",
            Self::BadDestUser => "BAD-DEST-USER",
            Self::BadRequestHeader => "BAD-RQST-HDR",
            Self::BadRequestBody => "BAD-RQST-BODY",
            Self::Delivery { .. } => "DELIVERY",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hello(handle) => write!(f, "HELLO {handle}"),
            Self::ListOk(handles) => write!(f, "LIST-OK {}", handles.join(",")),
            Self::Delivery { from, body } => write!(f, "DELIVERY {from} {body}"),
            other => f.write_str(other.keyword()),
        }
    }
}

impl FromStr for Reply {
    type Err = ReplyParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.is_empty() {
            return Err(ReplyParseError::Empty);
        }

        let (keyword, rest) = match line.split_once(' ') {
            Some((keyword, rest)) => (keyword, Some(rest)),
            None => (line, None),
        };

        let reply = match (keyword, rest) {
            ("HELLO", Some(handle)) if !handle.is_empty() => Self::Hello(handle.to_owned()),
            ("HELLO", _) => return Err(ReplyParseError::MissingArgument { keyword: "HELLO" }),
            ("LIST-OK", rest) => Self::ListOk(
                rest.unwrap_or_default()
                    .split(',')
                    .filter(|h| !h.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            ("DELIVERY", Some(rest)) => match rest.split_once(' ') {
                Some((from, body)) => Self::Delivery {
                    from: from.to_owned(),
                    body: body.to_owned(),
                },
                None => return Err(ReplyParseError::MissingArgument { keyword: "DELIVERY" }),
            },
            ("DELIVERY", None) => {
                return Err(ReplyParseError::MissingArgument { keyword: "DELIVERY" });
            }
            ("IN-USE", _) => Self::InUse,
            ("BUSY", _) => Self::Busy,
            ("SEND-OK", _) => Self::SendOk,
            ("BAD-DEST-USER", _) => Self::BadDestUser,
            ("BAD-RQST-HDR", _) => Self::BadRequestHeader,
            ("BAD-RQST-BODY", _) => Self::BadRequestBody,
            (other, _) => return Err(ReplyParseError::UnknownKeyword(other.to_owned())),
        };

        Ok(reply)
    }
}
