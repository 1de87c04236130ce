// src/core/scanner/mod.rs

// Each stage of the analysis pipeline lives in its own module; this file
// sequences them and reports progress between stages.
pub mod pattern_scanner;
pub mod reputation_scanner;
pub mod ssl_scanner;
pub mod url_validator;

use std::time::Duration;

use chrono::Utc;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::models::SecurityAnalysis;
use crate::core::scoring::{DomainClass, RandomSource};
use crate::error::ValidationError;
use self::pattern_scanner::{draw_threats, run_pattern_scan};
use self::reputation_scanner::{merge_verdicts, run_reputation_scan, ReputationSource};
use self::ssl_scanner::run_ssl_scan;
use self::url_validator::normalize_url;

/// The fixed, ordered steps of an analysis. Used for progress reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumCount)]
pub enum Stage {
    #[strum(to_string = "Validating URL format")]
    ValidateUrl,
    #[strum(to_string = "Checking SSL certificate")]
    CheckSsl,
    #[strum(to_string = "Scanning with Safe Browsing")]
    QuerySafeBrowsing,
    #[strum(to_string = "Running VirusTotal analysis")]
    QueryVirusTotal,
    #[strum(to_string = "Performing AI pattern analysis")]
    PatternAnalysis,
    #[strum(to_string = "Generating security report")]
    AssembleReport,
}

/// Emitted after a stage completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress {
    pub stage: Stage,
    pub completed: usize,
    pub total: usize,
}

impl StageProgress {
    /// Completed share of the pipeline in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.completed as f64 / self.total as f64
    }

    /// The stage that runs next, if any.
    pub fn next_stage(&self) -> Option<Stage> {
        Stage::iter().nth(self.completed)
    }
}

/// Runs the six-stage analysis for one URL at a time.
///
/// The engine owns its random source; `stage_delay` simulates the latency of
/// the remote checks and is zero in tests.
pub struct AnalysisEngine {
    rng: Box<dyn RandomSource>,
    stage_delay: Duration,
}

impl AnalysisEngine {
    pub fn new(rng: Box<dyn RandomSource>, stage_delay: Duration) -> Self {
        Self { rng, stage_delay }
    }

    /// Analyzes `raw_url` without reporting progress.
    pub async fn analyze(&mut self, raw_url: &str) -> Result<SecurityAnalysis, ValidationError> {
        self.analyze_with_progress(raw_url, |_| {}).await
    }

    /// Analyzes `raw_url`, invoking `on_progress` after every stage.
    ///
    /// Validation happens before the first stage runs; an invalid URL returns
    /// an error without any progress being reported.
    pub async fn analyze_with_progress<F>(
        &mut self,
        raw_url: &str,
        mut on_progress: F,
    ) -> Result<SecurityAnalysis, ValidationError>
    where
        F: FnMut(StageProgress),
    {
        let url = normalize_url(raw_url)?;
        let host = url.host_str().unwrap_or_default().to_string();
        info!(url = %url, "Starting analysis.");

        let mut stages = Stage::iter();
        let mut completed = 0;
        let mut advance = |on_progress: &mut F| {
            completed += 1;
            if let Some(stage) = stages.next() {
                debug!(%stage, completed, "Stage complete.");
                on_progress(StageProgress { stage, completed, total: Stage::COUNT });
            }
        };

        // Stage 1: the URL was validated above.
        pause(self.stage_delay).await;
        advance(&mut on_progress);

        pause(self.stage_delay).await;
        let ssl = run_ssl_scan(&host, self.rng.as_mut(), Utc::now());
        advance(&mut on_progress);

        pause(self.stage_delay).await;
        let safe_browsing = run_reputation_scan(ReputationSource::SafeBrowsing, &host);
        advance(&mut on_progress);

        pause(self.stage_delay).await;
        let virus_total = run_reputation_scan(ReputationSource::VirusTotal, &host);
        advance(&mut on_progress);

        pause(self.stage_delay).await;
        let class: DomainClass = merge_verdicts(safe_browsing, virus_total);
        let outcome = run_pattern_scan(&host, class, self.rng.as_mut());
        advance(&mut on_progress);

        pause(self.stage_delay).await;
        let threats = draw_threats(outcome.status, self.rng.as_mut());
        let analysis = SecurityAnalysis {
            id: Uuid::now_v7(),
            url: url.to_string(),
            timestamp: Utc::now(),
            safety_score: outcome.safety_score,
            status: outcome.status,
            ssl,
            threats,
            ai_analysis: outcome.narrative,
            recommendations: outcome.recommendations,
        };
        advance(&mut on_progress);

        info!(url = %analysis.url, score = analysis.safety_score, status = %analysis.status, "Analysis finished.");
        Ok(analysis)
    }
}

// Simulated latency of a remote check.
async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SafetyStatus;
    use crate::core::scoring::test_support::ScriptedSource;
    use crate::core::scoring::{SeededEntropy, SAFE_SCORE_FLOOR};

    fn seeded_engine(seed: u64) -> AnalysisEngine {
        AnalysisEngine::new(Box::new(SeededEntropy::from_seed(seed)), Duration::ZERO)
    }

    #[tokio::test]
    async fn allow_listed_domain_is_safe() {
        let mut engine = seeded_engine(1);
        let analysis = engine.analyze("google.com").await.unwrap();
        assert_eq!(analysis.url, "https://google.com/");
        assert_eq!(analysis.status, SafetyStatus::Safe);
        assert!((90..=99).contains(&analysis.safety_score));
        assert!(!analysis.threats.any());
    }

    #[tokio::test]
    async fn deny_listed_domain_is_dangerous() {
        let mut engine = seeded_engine(2);
        let analysis = engine.analyze("malware-test.com").await.unwrap();
        assert_eq!(analysis.status, SafetyStatus::Dangerous);
        assert!((10..=39).contains(&analysis.safety_score));
    }

    #[tokio::test]
    async fn reports_every_stage_in_order() {
        let mut engine = seeded_engine(3);
        let mut seen = Vec::new();
        engine
            .analyze_with_progress("example.org", |progress| seen.push(progress))
            .await
            .unwrap();

        let stages: Vec<Stage> = seen.iter().map(|p| p.stage).collect();
        assert_eq!(stages, Stage::iter().collect::<Vec<_>>());
        assert_eq!(seen.iter().map(|p| p.completed).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(seen.last().map(|p| p.ratio()), Some(1.0));
        assert_eq!(seen[0].next_stage(), Some(Stage::CheckSsl));
        assert_eq!(seen[5].next_stage(), None);
    }

    #[tokio::test]
    async fn invalid_url_reports_no_progress() {
        let mut engine = seeded_engine(4);
        let mut calls = 0;
        let result = engine.analyze_with_progress("not a url", |_| calls += 1).await;
        assert!(matches!(result, Err(ValidationError::Malformed { .. })));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn scripted_draws_reach_the_mixed_signal_branch() {
        // ssl: valid, issuer, expiry; score: 0.9 -> 86, mixed signal 0.2; threats: 0.0 x3
        let draws = [0.1, 0.1, 0.5, 0.9, 0.2, 0.0, 0.0, 0.0];
        let mut engine = AnalysisEngine::new(Box::new(ScriptedSource::new(&draws)), Duration::ZERO);
        let analysis = engine.analyze("https://unknown-shop.example/cart").await.unwrap();
        assert_eq!(analysis.safety_score, 86);
        assert_eq!(analysis.status, SafetyStatus::Warning);
        assert!(analysis.threats.suspicious);
        assert!(!analysis.threats.phishing && !analysis.threats.malware);
    }

    #[tokio::test]
    async fn invariants_hold_across_seeds() {
        let hosts = ["google.com", "github.com", "phishing-example.com", "example.org", "news.site.io"];
        for seed in 0..200 {
            let mut engine = seeded_engine(seed);
            for host in hosts {
                let a = engine.analyze(host).await.unwrap();
                assert!(a.safety_score <= 100);
                if a.status == SafetyStatus::Dangerous {
                    assert!(a.safety_score < SAFE_SCORE_FLOOR);
                }
                if a.status == SafetyStatus::Safe {
                    assert!(a.safety_score >= SAFE_SCORE_FLOOR);
                }
                if a.threats.phishing || a.threats.malware {
                    assert_ne!(a.status, SafetyStatus::Safe);
                }
                if host.contains("example.org") || host.contains("site.io") {
                    assert!((50..=89).contains(&a.safety_score));
                }
            }
        }
    }

    #[tokio::test]
    async fn ids_are_unique_within_a_session() {
        let mut engine = seeded_engine(5);
        let a = engine.analyze("github.com").await.unwrap();
        let b = engine.analyze("github.com").await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
