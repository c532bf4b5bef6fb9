use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Sites expected to stay reachable under allow-list filtering.
pub const ALLOWED_SITES: &[&str] = &[
    "yandex.ru",
    "ya.ru",
    "vk.com",
    "mail.ru",
    "ok.ru",
    "max.ru",
    "gosuslugi.ru",
    "tinkoff.ru",
    "sber.ru",
    "alfa-bank.ru",
    "gazprombank.ru",
    "vtb.ru",
    "ozon.ru",
    "wildberries.ru",
    "avito.ru",
    "drom.ru",
    "cian.ru",
    "pochta.ru",
    "mos.ru",
    "nalog.gov.ru",
    "kremlin.ru",
    "ria.ru",
    "yandex.net",
];

/// General internet sites, blocked when allow-list filtering is active.
pub const NORMAL_SITES: &[&str] = &[
    "google.com",
    "wikipedia.org",
    "youtube.com",
    "github.com",
    "reddit.com",
    "steamcommunity.com",
    "t.me",
    "chatgpt.com",
    "archive.org",
    "cloudflare.com",
    "openstreetmap.org",
    "mozilla.org",
    "example.org",
    "ovh.com",
    "spotify.com",
];

const MAX_HOST_LEN: usize = 253;

pub fn default_allowed() -> Vec<String> {
    ALLOWED_SITES.iter().map(|s| s.to_string()).collect()
}

pub fn default_normal() -> Vec<String> {
    NORMAL_SITES.iter().map(|s| s.to_string()).collect()
}

/// Parse a hosts file content into a deduplicated, order-preserving host list.
///
/// Supported format per line:
/// - one hostname: `example.org`
/// - comments: everything after `#` is ignored
/// - whitespace and blank lines are ignored
///
/// Hostnames are lowercased. URLs, paths and empty labels are rejected.
pub fn parse_hosts_str(s: &str) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (idx, raw_line) in s.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().map(str::trim).unwrap_or("");
        if line.is_empty() {
            continue;
        }

        let host = validate_host(line).with_context(|| format!("line {line_no}: invalid host: {line}"))?;
        if seen.insert(host.clone()) {
            out.push(host);
        }
    }

    Ok(out)
}

/// Load a host list from a file path. Errors if the file cannot be read or parsed.
pub fn load_hosts_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("failed to read hosts file: {}", path.as_ref().display()))?;
    parse_hosts_str(&content)
}

/// Load a host list from `path` if given, otherwise use `default`.
/// A file that parses to nothing is an error rather than a silent fallback.
pub fn load_hosts_or_default(path: Option<&Path>, default: Vec<String>) -> Result<Vec<String>> {
    match path {
        None => Ok(default),
        Some(p) => {
            let hosts = load_hosts_from_path(p)?;
            if hosts.is_empty() {
                bail!("hosts file {} contains no hosts", p.display());
            }
            Ok(hosts)
        }
    }
}

fn validate_host(s: &str) -> Result<String> {
    if s.contains("://") {
        bail!("expected a bare hostname, not a URL");
    }
    if s.contains('/') {
        bail!("hostname must not contain a path");
    }
    if s.chars().any(char::is_whitespace) {
        bail!("hostname must not contain whitespace");
    }
    if s.len() > MAX_HOST_LEN {
        bail!("hostname longer than {MAX_HOST_LEN} bytes");
    }
    let host = s.trim_end_matches('.').to_ascii_lowercase();
    if host.split('.').any(str::is_empty) {
        bail!("hostname has an empty label");
    }
    Ok(host)
}
