// src/core/scanner/pattern_scanner.rs

use tracing::{debug, info};

use crate::core::models::{SafetyStatus, ThreatFlags};
use crate::core::scoring::{self, DomainClass, RandomSource, ScoringOutcome};

const PHISHING_PROBABILITY: f64 = 0.5;
const MALWARE_PROBABILITY: f64 = 0.6;
const SUSPICIOUS_PROBABILITY: f64 = 0.4;

/// The heuristic pass: applies the scoring policy to the merged reputation verdict.
pub fn run_pattern_scan(host: &str, class: DomainClass, rng: &mut dyn RandomSource) -> ScoringOutcome {
    info!(host, ?class, "Running heuristic pattern pass.");
    let outcome = scoring::score_domain(class, rng);
    debug!(score = outcome.safety_score, status = %outcome.status, "Pattern pass scored host.");
    outcome
}

/// Draws the threat flags for a finished verdict.
///
/// Three draws are always consumed (phishing, malware, suspicious). Phishing
/// and malware can only be raised on `dangerous` verdicts, suspicious on
/// anything that is not `safe`.
pub fn draw_threats(status: SafetyStatus, rng: &mut dyn RandomSource) -> ThreatFlags {
    let dangerous = status == SafetyStatus::Dangerous;
    let not_safe = status != SafetyStatus::Safe;
    let phishing = rng.chance(PHISHING_PROBABILITY);
    let malware = rng.chance(MALWARE_PROBABILITY);
    let suspicious = rng.chance(SUSPICIOUS_PROBABILITY);

    ThreatFlags {
        phishing: dangerous && phishing,
        malware: dangerous && malware,
        suspicious: not_safe && suspicious,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::test_support::ScriptedSource;

    #[test]
    fn safe_verdicts_never_carry_threats() {
        let flags = draw_threats(SafetyStatus::Safe, &mut ScriptedSource::new(&[0.0, 0.0, 0.0]));
        assert_eq!(flags, ThreatFlags::default());
    }

    #[test]
    fn warnings_can_only_be_suspicious() {
        let flags = draw_threats(SafetyStatus::Warning, &mut ScriptedSource::new(&[0.0, 0.0, 0.0]));
        assert_eq!(flags, ThreatFlags { phishing: false, malware: false, suspicious: true });
    }

    #[test]
    fn dangerous_verdicts_follow_their_draws() {
        let all = draw_threats(SafetyStatus::Dangerous, &mut ScriptedSource::new(&[0.1, 0.1, 0.1]));
        assert_eq!(all, ThreatFlags { phishing: true, malware: true, suspicious: true });

        let none = draw_threats(SafetyStatus::Dangerous, &mut ScriptedSource::new(&[0.55, 0.65, 0.45]));
        assert_eq!(none, ThreatFlags::default());

        let malware_only = draw_threats(SafetyStatus::Dangerous, &mut ScriptedSource::new(&[0.55, 0.55, 0.9]));
        assert_eq!(malware_only, ThreatFlags { phishing: false, malware: true, suspicious: false });
    }

    #[test]
    fn pattern_pass_delegates_to_policy() {
        let outcome = run_pattern_scan("malware-test.com", DomainClass::DenyListed, &mut ScriptedSource::new(&[0.5]));
        assert_eq!(outcome.safety_score, 25);
        assert_eq!(outcome.status, SafetyStatus::Dangerous);
    }
}
