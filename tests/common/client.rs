//! Test relay client.
//!
//! Provides a client for integration testing that can send raw lines and
//! assert on parsed replies.

use relay_proto::Reply;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test relay client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send raw bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send one line, adding the `\n` terminator.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single raw line, without its terminator.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        if !line.ends_with('\n') {
            anyhow::bail!("unterminated line: {line:?}");
        }
        line.pop();
        Ok(line)
    }

    /// Receive a single reply from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Reply> {
        let line = self.recv_line().await?;
        line.parse::<Reply>()
            .map_err(|e| anyhow::anyhow!("Parse error on {line:?}: {e}"))
    }

    /// Send a line and return the next reply.
    pub async fn request(&mut self, line: &str) -> anyhow::Result<Reply> {
        self.send_raw(line).await?;
        self.recv().await
    }

    /// Claim `handle`, failing unless the server answers `HELLO handle`.
    pub async fn hello(&mut self, handle: &str) -> anyhow::Result<()> {
        let reply = self.request(&format!("HELLO-FROM {handle}")).await?;
        if reply != Reply::Hello(handle.to_string()) {
            anyhow::bail!("expected HELLO {handle}, got {reply}");
        }
        Ok(())
    }

    /// Send LIST and return the handles, sorted.
    pub async fn list(&mut self) -> anyhow::Result<Vec<String>> {
        match self.request("LIST").await? {
            Reply::ListOk(mut handles) => {
                handles.sort();
                Ok(handles)
            }
            other => anyhow::bail!("expected LIST-OK, got {other}"),
        }
    }

    /// Assert nothing arrives within `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        let mut line = String::new();
        match timeout(dur, self.reader.read_line(&mut line)).await {
            Err(_) => Ok(()),
            Ok(Ok(0)) => anyhow::bail!("connection closed"),
            Ok(Ok(_)) => anyhow::bail!("unexpected line: {line:?}"),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Wait for the server to close the connection.
    pub async fn wait_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            match timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await? {
                Ok(0) => return Ok(()),
                Ok(_) => continue,
                // A reset counts as closed.
                Err(_) => return Ok(()),
            }
        }
    }

    /// Close the write side, signalling end-of-stream to the server.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
