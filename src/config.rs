use std::time::Duration;

/// Default number of hosts probed at once.
pub const DEFAULT_WORKERS: usize = 10;

/// Per-stage timeouts. Each one bounds a single network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub dns: Duration,
    pub tcp: Duration,
    pub http: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            dns: Duration::from_secs(4),
            tcp: Duration::from_secs(4),
            http: Duration::from_secs(6),
        }
    }
}

impl Timeouts {
    /// Upper bound on how long one host check can take: DNS, the TCP pair
    /// (run together) and both HTTP(S) attempts.
    pub fn host_budget(&self) -> Duration {
        self.dns + self.tcp + self.http * 2
    }
}

/// Settings for one run over a host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub workers: usize,
    pub timeouts: Timeouts,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeouts: Timeouts::default(),
        }
    }
}

/// How the shared HTTP client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` from the environment.
    pub use_system_proxy: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Timeouts::default().http,
            use_system_proxy: true,
            user_agent: concat!("wlc-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_timeouts(timeouts: &Timeouts) -> Self {
        Self {
            timeout: timeouts.http,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tool_constants() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.workers, 10);
        assert_eq!(cfg.timeouts.dns, Duration::from_secs(4));
        assert_eq!(cfg.timeouts.tcp, Duration::from_secs(4));
        assert_eq!(cfg.timeouts.http, Duration::from_secs(6));
        assert_eq!(cfg.timeouts.host_budget(), Duration::from_secs(20));
    }

    #[test]
    fn client_config_takes_http_timeout() {
        let t = Timeouts {
            http: Duration::from_millis(1500),
            ..Timeouts::default()
        };
        let c = ClientConfig::from_timeouts(&t);
        assert_eq!(c.timeout, Duration::from_millis(1500));
        assert!(c.use_system_proxy);
        assert!(c.user_agent.starts_with("wlc-rs/"));
    }
}
