//! Relay request/reply codec for tokio.
//!
//! This module provides the server-side codec: it decodes client lines into
//! [`Command`]s and encodes [`Reply`]s.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::command::{Command, Malformed};
use crate::error;
use crate::line::{Frame, LineCodec};
use crate::reply::Reply;

/// Tokio codec for the server side of the relay protocol.
///
/// Wraps [`LineCodec`] and parses lines into [`Command`]s. Lines the framer
/// could not deliver intact (over-long or not UTF-8) decode as
/// `Command::Malformed(Malformed::Header)`.
pub struct RelayCodec {
    inner: LineCodec,
}

impl RelayCodec {
    /// Create a new codec with the default line limit.
    pub fn new() -> Self {
        Self {
            inner: LineCodec::new(),
        }
    }

    /// Create a new codec with custom max line length.
    ///
    /// # Arguments
    /// * `max_len` - Maximum line length in bytes
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            inner: LineCodec::with_max_len(max_len),
        }
    }

    fn frame_to_command(frame: Frame) -> Command {
        match frame {
            Frame::Line(line) => Command::parse(&line),
            Frame::TooLong { len } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(len, "Discarded over-long line");
                #[cfg(not(feature = "tracing"))]
                let _ = len;
                Command::Malformed(Malformed::Header)
            }
            Frame::InvalidUtf8 => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Discarded line with invalid UTF-8");
                Command::Malformed(Malformed::Header)
            }
        }
    }
}

impl Default for RelayCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RelayCodec {
    type Item = Command;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Command>> {
        Ok(self.inner.decode(src)?.map(Self::frame_to_command))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Command>> {
        Ok(self.inner.decode_eof(src)?.map(Self::frame_to_command))
    }
}

impl<'a> Encoder<&'a Reply> for RelayCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: &'a Reply, dst: &mut BytesMut) -> error::Result<()> {
        self.inner.encode(reply.to_string(), dst)
    }
}

impl Encoder<Reply> for RelayCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: Reply, dst: &mut BytesMut) -> error::Result<()> {
        <Self as Encoder<&Reply>>::encode(self, &reply, dst)
    }
}
