use std::future::Future;
use std::time::Duration;
use tokio::time;
use tracing::debug;

use crate::transport::Transport;

/// Run `fut` under `limit`, folding timeouts and errors into `None`.
async fn bounded<T, F>(stage: &'static str, target: &str, limit: Duration, fut: F) -> Option<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match time::timeout(limit, fut).await {
        Ok(Ok(v)) => Some(v),
        Ok(Err(e)) => {
            debug!(stage, target, error = %e, "stage failed");
            None
        }
        Err(_) => {
            debug!(stage, target, ?limit, "stage timed out");
            None
        }
    }
}

/// True iff `host` resolves to at least one address within `limit`.
pub async fn probe_dns<T: Transport + ?Sized>(transport: &T, host: &str, limit: Duration) -> bool {
    bounded("dns", host, limit, transport.resolve(host))
        .await
        .is_some_and(|addrs| !addrs.is_empty())
}

/// True iff a TCP connection to `host:port` completes within `limit`.
pub async fn probe_tcp<T: Transport + ?Sized>(
    transport: &T,
    host: &str,
    port: u16,
    limit: Duration,
) -> bool {
    bounded("tcp", host, limit, transport.connect(host, port))
        .await
        .is_some()
}

/// Try `https://host`, then `http://host`; true on the first attempt that gets
/// any response within `limit`.
pub async fn probe_http<T: Transport + ?Sized>(transport: &T, host: &str, limit: Duration) -> bool {
    for scheme in ["https", "http"] {
        let url = format!("{scheme}://{host}");
        if bounded("http", &url, limit, transport.fetch(&url)).await.is_some() {
            return true;
        }
    }
    false
}
