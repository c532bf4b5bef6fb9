//! Network primitives behind the probe stages.
//!
//! The stages in [`crate::probe`] only see the [`Transport`] trait, so the
//! checker and runner can be driven by an in-memory transport in tests.
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::net::{lookup_host, TcpStream};

use crate::config::ClientConfig;

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Resolve `host` to its addresses.
    async fn resolve(&self, host: &str) -> Result<Vec<SocketAddr>>;

    /// Open a TCP connection to `host:port` and close it again.
    async fn connect(&self, host: &str, port: u16) -> Result<()>;

    /// Issue a GET to `url`. Any response counts, whatever its status.
    async fn fetch(&self, url: &str) -> Result<()>;
}

/// Real transport: system resolver, tokio sockets and one pooled HTTP client.
#[derive(Debug, Clone)]
pub struct NetTransport {
    client: reqwest::Client,
}

impl NetTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for NetTransport {
    async fn resolve(&self, host: &str) -> Result<Vec<SocketAddr>> {
        let addrs = lookup_host((host, 0)).await?.collect();
        Ok(addrs)
    }

    async fn connect(&self, host: &str, port: u16) -> Result<()> {
        let stream = TcpStream::connect((host, port)).await?;
        drop(stream);
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<()> {
        let resp = self.client.get(url).send().await?;
        tracing::trace!(url, status = %resp.status(), "fetched");
        drop(resp);
        Ok(())
    }
}
