// src/core/scoring.rs

//! The classification policy: turns a host's reputation context into a score,
//! a status and the advice that goes with them.
//!
//! Every random decision is drawn from a [`RandomSource`], so each branch can be
//! exercised with scripted draws.

use crate::core::knowledge_base::{self, VerdictTemplate};
use crate::core::models::SafetyStatus;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that an unknown domain is flagged despite a passing score.
const MIXED_SIGNAL_PROBABILITY: f64 = 0.3;
/// Scores below this are never classified `safe`.
pub const SAFE_SCORE_FLOOR: u8 = 60;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;

    /// Draws `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Draws an integer uniformly from `base..base + span`.
    fn pick(&mut self, base: u8, span: u8) -> u8 {
        let offset = (self.next_unit() * f64::from(span)).floor() as u8;
        base + offset.min(span.saturating_sub(1))
    }
}

/// Production randomness backed by a seedable `StdRng`.
pub struct SeededEntropy(StdRng);

impl SeededEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for SeededEntropy {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// What the reputation stages concluded about a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainClass {
    AllowListed,
    DenyListed,
    Unknown,
}

impl DomainClass {
    /// Classifies a host name against the reference lists. The allow-list wins
    /// when a host matches both.
    pub fn of_host(host: &str) -> Self {
        if knowledge_base::allow_listed(host).is_some() {
            DomainClass::AllowListed
        } else if knowledge_base::deny_listed(host).is_some() {
            DomainClass::DenyListed
        } else {
            DomainClass::Unknown
        }
    }
}

/// The policy's verdict for one host.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub safety_score: u8,
    pub status: SafetyStatus,
    pub narrative: String,
    pub recommendations: Vec<String>,
}

impl ScoringOutcome {
    fn from_template(safety_score: u8, status: SafetyStatus, template: &VerdictTemplate) -> Self {
        Self {
            safety_score,
            status,
            narrative: template.narrative.to_string(),
            recommendations: template.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Scores a host given its classification.
///
/// Allow-listed hosts land in `[90, 99]`, deny-listed ones in `[10, 39]`.
/// Unknown hosts land in `[50, 89]` and draw a second value deciding whether a
/// passing score is still reported as `warning`.
pub fn score_domain(class: DomainClass, rng: &mut dyn RandomSource) -> ScoringOutcome {
    match class {
        DomainClass::AllowListed => {
            let score = rng.pick(90, 10);
            ScoringOutcome::from_template(score, SafetyStatus::Safe, &knowledge_base::TRUSTED_DOMAIN)
        }
        DomainClass::DenyListed => {
            let score = rng.pick(10, 30);
            ScoringOutcome::from_template(score, SafetyStatus::Dangerous, &knowledge_base::HOSTILE_DOMAIN)
        }
        DomainClass::Unknown => {
            let score = rng.pick(50, 40);
            let mixed_signals = rng.chance(MIXED_SIGNAL_PROBABILITY);
            if mixed_signals || score < SAFE_SCORE_FLOOR {
                ScoringOutcome::from_template(score, SafetyStatus::Warning, &knowledge_base::MIXED_SIGNALS)
            } else {
                ScoringOutcome::from_template(score, SafetyStatus::Safe, &knowledge_base::CLEAN_UNKNOWN)
            }
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::RandomSource;
    use std::collections::VecDeque;

    /// Replays a fixed list of draws, then repeats the last one.
    pub struct ScriptedSource {
        draws: VecDeque<f64>,
        last: f64,
    }

    impl ScriptedSource {
        pub fn new(draws: &[f64]) -> Self {
            Self { draws: draws.iter().copied().collect(), last: 0.0 }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            if let Some(draw) = self.draws.pop_front() {
                self.last = draw;
            }
            self.last
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ScriptedSource;
    use super::*;

    #[test]
    fn classifies_hosts_against_lists() {
        assert_eq!(DomainClass::of_host("github.com"), DomainClass::AllowListed);
        assert_eq!(DomainClass::of_host("phishing-example.com"), DomainClass::DenyListed);
        assert_eq!(DomainClass::of_host("example.org"), DomainClass::Unknown);
        // Allow-list is consulted first.
        assert_eq!(DomainClass::of_host("google.com.malware-test.com"), DomainClass::AllowListed);
    }

    #[test]
    fn allow_listed_scores_span_ninety_to_ninety_nine() {
        let low = score_domain(DomainClass::AllowListed, &mut ScriptedSource::new(&[0.0]));
        let high = score_domain(DomainClass::AllowListed, &mut ScriptedSource::new(&[0.9999]));
        assert_eq!((low.safety_score, high.safety_score), (90, 99));
        assert_eq!(low.status, SafetyStatus::Safe);
        assert_eq!(low.narrative, knowledge_base::TRUSTED_DOMAIN.narrative);
        assert_eq!(low.recommendations.len(), 4);
    }

    #[test]
    fn deny_listed_scores_span_ten_to_thirty_nine() {
        let low = score_domain(DomainClass::DenyListed, &mut ScriptedSource::new(&[0.0]));
        let high = score_domain(DomainClass::DenyListed, &mut ScriptedSource::new(&[0.9999]));
        assert_eq!((low.safety_score, high.safety_score), (10, 39));
        assert_eq!(high.status, SafetyStatus::Dangerous);
    }

    #[test]
    fn unknown_domain_with_passing_score_can_still_warn() {
        // Score draw 0.75 -> 80, mixed-signal draw 0.1 -> flagged.
        let outcome = score_domain(DomainClass::Unknown, &mut ScriptedSource::new(&[0.75, 0.1]));
        assert_eq!(outcome.safety_score, 80);
        assert_eq!(outcome.status, SafetyStatus::Warning);
        assert_eq!(outcome.narrative, knowledge_base::MIXED_SIGNALS.narrative);
    }

    #[test]
    fn unknown_domain_without_mixed_signals_is_safe() {
        let outcome = score_domain(DomainClass::Unknown, &mut ScriptedSource::new(&[0.75, 0.9]));
        assert_eq!(outcome.safety_score, 80);
        assert_eq!(outcome.status, SafetyStatus::Safe);
    }

    #[test]
    fn unknown_domain_below_floor_is_never_safe() {
        let outcome = score_domain(DomainClass::Unknown, &mut ScriptedSource::new(&[0.0, 0.9]));
        assert_eq!(outcome.safety_score, 50);
        assert_eq!(outcome.status, SafetyStatus::Warning);
    }

    #[test]
    fn seeded_entropy_is_reproducible() {
        let mut a = SeededEntropy::from_seed(7);
        let mut b = SeededEntropy::from_seed(7);
        for _ in 0..16 {
            let draw = a.next_unit();
            assert!((0.0..1.0).contains(&draw));
            assert_eq!(draw, b.next_unit());
        }
    }
}
