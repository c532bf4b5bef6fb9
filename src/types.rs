use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability record for one host. Each flag is one probe stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub host: String,
    pub dns: bool,
    pub tcp80: bool,
    pub tcp443: bool,
    pub http: bool,
}

impl HostResult {
    /// A record with every stage marked unreachable.
    pub fn unreachable(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            dns: false,
            tcp80: false,
            tcp443: false,
            http: false,
        }
    }

    pub fn status(&self) -> Status {
        Status::of(self)
    }
}

/// Deepest stage a host got through.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Tcp,
    Dns,
    Fail,
}

impl Status {
    pub fn of(r: &HostResult) -> Self {
        if r.http {
            Status::Ok
        } else if r.tcp80 || r.tcp443 {
            Status::Tcp
        } else if r.dns {
            Status::Dns
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Tcp => "TCP",
            Status::Dns => "DNS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One host line of a serialized report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    #[serde(flatten)]
    pub result: HostResult,
    pub status: Status,
}

impl From<HostResult> for HostEntry {
    fn from(result: HostResult) -> Self {
        let status = result.status();
        Self { result, status }
    }
}

/// Results and score for one site list.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SiteReport {
    pub title: String,
    pub score: f64,
    pub results: Vec<HostEntry>,
}

/// Full run summary written by `--output`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckReport {
    pub checked_at: String,
    pub allowed: SiteReport,
    pub normal: SiteReport,
    pub verdict: String,
}
