use tracing::debug;

use crate::config::Timeouts;
use crate::probe::{probe_dns, probe_http, probe_tcp};
use crate::transport::Transport;
use crate::types::HostResult;

/// Probe one host through every stage and return its record.
///
/// - DNS first. TCP on 80 and 443 runs only if DNS succeeded, both ports at once.
/// - HTTP(S) always runs: a proxy or a different resolver path may still reach the site.
pub async fn check_host<T: Transport + ?Sized>(
    transport: &T,
    host: &str,
    timeouts: &Timeouts,
) -> HostResult {
    let mut r = HostResult::unreachable(host);

    r.dns = probe_dns(transport, host, timeouts.dns).await;

    if r.dns {
        let (tcp80, tcp443) = tokio::join!(
            probe_tcp(transport, host, 80, timeouts.tcp),
            probe_tcp(transport, host, 443, timeouts.tcp),
        );
        r.tcp80 = tcp80;
        r.tcp443 = tcp443;
    }

    r.http = probe_http(transport, host, timeouts.http).await;

    debug!(host, dns = r.dns, tcp80 = r.tcp80, tcp443 = r.tcp443, http = r.http, "host checked");
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// DNS never resolves; HTTP works through some other path.
    #[derive(Default)]
    struct NoDns {
        connects: AtomicUsize,
        http_ok: bool,
    }

    #[async_trait]
    impl Transport for NoDns {
        async fn resolve(&self, host: &str) -> Result<Vec<SocketAddr>> {
            Err(anyhow!("{host}: NXDOMAIN"))
        }

        async fn connect(&self, _host: &str, _port: u16) -> Result<()> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn fetch(&self, _url: &str) -> Result<()> {
            if self.http_ok {
                Ok(())
            } else {
                Err(anyhow!("refused"))
            }
        }
    }

    /// Everything reachable except port 80.
    struct No80;

    #[async_trait]
    impl Transport for No80 {
        async fn resolve(&self, _host: &str) -> Result<Vec<SocketAddr>> {
            Ok(vec!["10.0.0.1:0".parse()?])
        }

        async fn connect(&self, _host: &str, port: u16) -> Result<()> {
            if port == 80 {
                Err(anyhow!("filtered"))
            } else {
                Ok(())
            }
        }

        async fn fetch(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn dns_failure_skips_tcp_but_not_http() {
        let t = NoDns { http_ok: true, ..Default::default() };
        let r = check_host(&t, "vk.com", &Timeouts::default()).await;
        assert_eq!(r.host, "vk.com");
        assert!(!r.dns && !r.tcp80 && !r.tcp443);
        assert!(r.http);
        assert_eq!(t.connects.load(Ordering::SeqCst), 0);

        let t = NoDns::default();
        let r = check_host(&t, "vk.com", &Timeouts::default()).await;
        assert_eq!(r, HostResult::unreachable("vk.com"));
    }

    #[tokio::test]
    async fn tcp_ports_are_independent() {
        let r = check_host(&No80, "ok.ru", &Timeouts::default()).await;
        assert!(r.dns);
        assert!(!r.tcp80);
        assert!(r.tcp443);
        assert!(r.http);
    }
}
