use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use time::{format_description::well_known, OffsetDateTime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wlc_rs::config::{ClientConfig, RunConfig, Timeouts, DEFAULT_WORKERS};
use wlc_rs::progress::{site_bar, NoProgress};
use wlc_rs::runner::run_checks;
use wlc_rs::score::{score, Verdict};
use wlc_rs::sites;
use wlc_rs::transport::NetTransport;
use wlc_rs::types::{CheckReport, HostResult, SiteReport};

/// wlc-rs — checks whether the network only lets an allow-list of sites through.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wlc-rs",
    version,
    about = "Checks whether the network only lets an allow-list of sites through.",
    long_about = None
)]
struct Cli {
    /// File with allow-list sites, one host per line. Defaults to the built-in list.
    #[arg(long)]
    allowed: Option<PathBuf>,

    /// File with general internet sites, one host per line. Defaults to the built-in list.
    #[arg(long)]
    normal: Option<PathBuf>,

    /// Max hosts checked at once.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// DNS lookup timeout in milliseconds.
    #[arg(long = "dns-timeout-ms", default_value_t = 4000)]
    dns_timeout_ms: u64,

    /// TCP connect timeout in milliseconds.
    #[arg(long = "tcp-timeout-ms", default_value_t = 4000)]
    tcp_timeout_ms: u64,

    /// HTTP(S) request timeout in milliseconds.
    #[arg(long = "http-timeout-ms", default_value_t = 6000)]
    http_timeout_ms: u64,

    /// Ignore HTTP(S)_PROXY environment settings.
    #[arg(long = "no-proxy", default_value_t = false)]
    no_proxy: bool,

    /// Do not draw progress bars.
    #[arg(long = "no-progress", default_value_t = false)]
    no_progress: bool,

    /// Write the report as pretty JSON to this path (optional).
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            workers: self.workers,
            timeouts: Timeouts {
                dns: Duration::from_millis(self.dns_timeout_ms),
                tcp: Duration::from_millis(self.tcp_timeout_ms),
                http: Duration::from_millis(self.http_timeout_ms),
            },
        }
    }

    fn client_config(&self, timeouts: &Timeouts) -> ClientConfig {
        ClientConfig {
            use_system_proxy: !self.no_proxy,
            ..ClientConfig::from_timeouts(timeouts)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wlc_rs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();

    let allowed_hosts = sites::load_hosts_or_default(cli.allowed.as_deref(), sites::default_allowed())?;
    let normal_hosts = sites::load_hosts_or_default(cli.normal.as_deref(), sites::default_normal())?;

    let transport = Arc::new(NetTransport::new(&cli.client_config(&config.timeouts))?);

    tracing::info!(
        allowed = allowed_hosts.len(),
        normal = normal_hosts.len(),
        workers = config.workers,
        host_budget = ?config.timeouts.host_budget(),
        "wlc-rs starting"
    );
    println!("wlc-rs started...");

    let allowed = check_list(&transport, &allowed_hosts, &config, &cli, "allow-list sites").await;
    let normal = check_list(&transport, &normal_hosts, &config, &cli, "general sites").await;

    print_results("Allow-list sites", &allowed);
    print_results("General sites", &normal);

    let r_allowed = score(&allowed);
    let r_normal = score(&normal);
    let verdict = Verdict::classify(r_allowed, r_normal);

    println!("\nSummary:");
    println!("Allow-list sites reachable: {:.0}%", r_allowed * 100.0);
    println!("General sites reachable:    {:.0}%", r_normal * 100.0);
    println!("{verdict}");

    if let Some(path) = cli.output.as_deref() {
        let report = CheckReport {
            checked_at: now_rfc3339(),
            allowed: site_report("Allow-list sites", allowed, r_allowed),
            normal: site_report("General sites", normal, r_normal),
            verdict: verdict.message().to_string(),
        };
        write_report_json(path, &report)?;
        println!("Wrote JSON report to {}", path.display());
    }

    Ok(())
}

async fn check_list(
    transport: &Arc<NetTransport>,
    hosts: &[String],
    config: &RunConfig,
    cli: &Cli,
    label: &'static str,
) -> Vec<HostResult> {
    if cli.no_progress {
        run_checks(transport.clone(), hosts, config, NoProgress).await
    } else {
        let bar = site_bar(hosts.len() as u64, label);
        run_checks(transport.clone(), hosts, config, bar).await
    }
}

fn print_results(title: &str, results: &[HostResult]) {
    let host_w = results.iter().map(|r| r.host.len()).max().unwrap_or(0).max(20);
    println!("\n{title}");
    println!("{:-<24}", "");
    for r in results {
        println!("{:<host_w$}  {}", r.host, r.status(), host_w = host_w);
    }
}

fn site_report(title: &str, results: Vec<HostResult>, score: f64) -> SiteReport {
    SiteReport {
        title: title.to_string(),
        score,
        results: results.into_iter().map(Into::into).collect(),
    }
}

fn write_report_json(path: &Path, report: &CheckReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
