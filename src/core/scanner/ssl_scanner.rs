// src/core/scanner/ssl_scanner.rs

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::core::models::SslInfo;
use crate::core::scoring::RandomSource;

/// Issuers the simulated handshake can report.
const ISSUERS: [&str; 2] = ["Let's Encrypt", "DigiCert Inc"];
const VALID_PROBABILITY: f64 = 0.9;
const MAX_VALIDITY_DAYS: i64 = 365;

/// Simulates the certificate check for `host`.
///
/// Draws, in order: validity, issuer, expiry offset. No connection is made.
pub fn run_ssl_scan(host: &str, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> SslInfo {
    info!(host, "Starting simulated SSL/TLS check.");

    let valid = rng.chance(VALID_PROBABILITY);
    let issuer = if rng.chance(0.5) { ISSUERS[0] } else { ISSUERS[1] };
    let seconds_left = (rng.next_unit() * (MAX_VALIDITY_DAYS * 24 * 60 * 60) as f64) as i64;
    let expires = now + Duration::seconds(seconds_left);

    debug!(valid, issuer, expires = %expires, "Simulated certificate drawn.");
    SslInfo { valid, issuer: issuer.to_string(), expires: Some(expires) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::test_support::ScriptedSource;

    #[test]
    fn draws_validity_issuer_and_expiry_in_order() {
        let now = Utc::now();
        let ssl = run_ssl_scan("example.com", &mut ScriptedSource::new(&[0.2, 0.1, 0.5]), now);
        assert!(ssl.valid);
        assert_eq!(ssl.issuer, "Let's Encrypt");
        let days = ssl.expires.unwrap().signed_duration_since(now).num_days();
        assert!((182..=183).contains(&days), "expected about half a year, got {days}");
    }

    #[test]
    fn high_validity_draw_marks_certificate_invalid() {
        let now = Utc::now();
        let ssl = run_ssl_scan("example.com", &mut ScriptedSource::new(&[0.95, 0.7, 0.0]), now);
        assert!(!ssl.valid);
        assert_eq!(ssl.issuer, "DigiCert Inc");
        assert_eq!(ssl.expires, Some(now));
    }
}
