// src/core/scanner/reputation_scanner.rs

use strum::Display;
use tracing::{debug, info};

use crate::core::scoring::DomainClass;

/// The two simulated threat-intelligence feeds queried by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReputationSource {
    #[strum(to_string = "Safe Browsing")]
    SafeBrowsing,
    #[strum(to_string = "VirusTotal")]
    VirusTotal,
}

/// Simulates a lookup of `host` in one reputation feed.
///
/// Both feeds answer from the same reference lists; no request leaves the process.
pub fn run_reputation_scan(source: ReputationSource, host: &str) -> DomainClass {
    info!(%source, host, "Querying reputation source.");
    let class = DomainClass::of_host(host);
    debug!(%source, ?class, "Reputation source answered.");
    class
}

/// Merges two feed answers. A trusted listing wins over a hostile one, and any
/// listing wins over no record.
pub fn merge_verdicts(a: DomainClass, b: DomainClass) -> DomainClass {
    use DomainClass::*;
    match (a, b) {
        (AllowListed, _) | (_, AllowListed) => AllowListed,
        (DenyListed, _) | (_, DenyListed) => DenyListed,
        (Unknown, Unknown) => Unknown,
    }
}
