//! Line-based codec for tokio.
//!
//! This module provides the framing layer: it splits a byte stream into
//! `\n`-terminated lines, keeping any partial line buffered until its
//! terminator arrives.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 8192;

/// One framed unit read from a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line with its `\n` removed. Any `\r` is kept.
    Line(String),
    /// A line longer than the limit. Its bytes were discarded up to and
    /// including the terminator.
    TooLong {
        /// Number of bytes discarded.
        len: usize,
    },
    /// A complete line that was not valid UTF-8.
    InvalidUtf8,
}

/// Line-based codec that handles newline-terminated messages.
///
/// Over-long lines do not fail the stream: the codec switches to discard
/// mode, drops input until the next `\n` and then yields
/// [`Frame::TooLong`] once. Errors are reserved for I/O failures so that a
/// `FramedRead` only ends on end-of-stream or a broken socket.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Bytes dropped so far while discarding an over-long line
    discarding: Option<usize>,
}

impl LineCodec {
    /// Create a new codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: None,
        }
    }

    fn decode_line(line: &[u8]) -> Frame {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        match std::str::from_utf8(line) {
            Ok(text) => Frame::Line(text.to_owned()),
            Err(_) => Frame::InvalidUtf8,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = Frame;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        if let Some(dropped) = self.discarding {
            return match src.iter().position(|b| *b == b'\n') {
                Some(offset) => {
                    src.advance(offset + 1);
                    self.discarding = None;
                    self.next_index = 0;
                    Ok(Some(Frame::TooLong {
                        len: dropped + offset + 1,
                    }))
                }
                None => {
                    self.discarding = Some(dropped + src.len());
                    src.clear();
                    Ok(None)
                }
            };
        }

        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Ok(Some(Frame::TooLong { len: line.len() }));
            }

            Ok(Some(Self::decode_line(&line)))
        } else if src.len() > self.max_len {
            // Partial line already over the limit: drop it and wait for its end
            self.discarding = Some(src.len());
            self.next_index = 0;
            src.clear();
            Ok(None)
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();
            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        // An unterminated tail is never a line.
        if !src.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(bytes = src.len(), "Dropping unterminated trailing bytes");
            src.clear();
        }
        self.next_index = 0;
        self.discarding = None;
        Ok(None)
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        if msg.contains('\n') {
            return Err(error::ProtocolError::EmbeddedNewline);
        }

        dst.reserve(msg.len() + 1);
        dst.extend_from_slice(msg.as_bytes());
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}
