use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::HostResult;

/// Above this share a site list counts as reachable.
pub const HIGH: f64 = 0.6;
/// Below this share a site list counts as blocked.
pub const LOW: f64 = 0.3;

/// Share of hosts whose HTTP(S) stage succeeded; 0 for an empty list.
pub fn score(results: &[HostResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let ok = results.iter().filter(|r| r.http).count();
    ok as f64 / results.len() as f64
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AllowListLikely,
    Normal,
    Unreachable,
    Ambiguous,
}

impl Verdict {
    pub fn classify(allowed: f64, normal: f64) -> Self {
        if allowed > HIGH && normal < LOW {
            Verdict::AllowListLikely
        } else if allowed > HIGH && normal > HIGH {
            Verdict::Normal
        } else if allowed < LOW && normal < LOW {
            Verdict::Unreachable
        } else {
            Verdict::Ambiguous
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::AllowListLikely => "Allow-list filtering is likely active",
            Verdict::Normal => "Network is working normally",
            Verdict::Unreachable => "Network is almost entirely unreachable",
            Verdict::Ambiguous => "Result is ambiguous",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
