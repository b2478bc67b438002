//! In-process test server.
//!
//! Runs a Gateway on an ephemeral loopback port inside the test runtime.

use relayd::config::Config;
use relayd::{Gateway, Hub};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::TestClient;

/// A running relay bound to 127.0.0.1.
pub struct TestServer {
    addr: SocketAddr,
    hub: Arc<Hub>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server with default settings.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::default()).await
    }

    /// Spawn a server allowing at most `max_users` handles.
    pub async fn with_capacity(max_users: usize) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.server.max_users = max_users;
        Self::spawn_with(config).await
    }

    /// Spawn a server with custom config. The listen section is overridden.
    pub async fn spawn_with(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = "127.0.0.1".to_string();
        config.listen.port = 0;

        let hub = Arc::new(Hub::new(&config));
        let gateway = Gateway::bind(&config.listen, Arc::clone(&hub)).await?;
        let addr = gateway.local_addr()?;
        let handle = tokio::spawn(gateway.run());

        Ok(Self {
            addr,
            hub,
            handle: Some(handle),
        })
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// Open a new client connection.
    pub async fn connect(&self) -> anyhow::Result<TestClient> {
        TestClient::connect(&self.address()).await
    }

    /// Connect and claim `handle`, asserting the claim succeeds.
    pub async fn login(&self, handle: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect().await?;
        client.hello(handle).await?;
        Ok(client)
    }

    /// Wait until the directory holds exactly `count` handles.
    pub async fn wait_for_users(&self, count: usize) -> anyhow::Result<()> {
        let hub = Arc::clone(&self.hub);
        timeout(Duration::from_secs(5), async move {
            while hub.directory.len() != count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .map_err(|_| anyhow::anyhow!("directory never reached {count} users"))
    }

    /// Request shutdown and wait for the gateway to drain.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.hub.lifecycle.shutdown();
        if let Some(handle) = self.handle.take() {
            timeout(Duration::from_secs(5), handle).await???;
        }
        Ok(())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.hub.lifecycle.shutdown();
    }
}
