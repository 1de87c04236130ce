// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Maximum number of analyses kept in an account's history.
pub const HISTORY_LIMIT: usize = 100;

// --- Classification ---

/// The verdict attached to an analysis.
///
/// `Unknown` is never produced by the engine; it exists so records written by
/// other tools still deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Warning,
    Dangerous,
    Unknown,
}

/// Coarse band used when presenting a score, mirroring the report colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

// --- Analysis Record ---

// Simulated certificate metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SslInfo {
    pub valid: bool,
    pub issuer: String,
    pub expires: Option<DateTime<Utc>>,
}

// Threat flags raised by the reputation and pattern stages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreatFlags {
    pub phishing: bool,
    pub malware: bool,
    pub suspicious: bool,
}

impl ThreatFlags {
    pub fn any(&self) -> bool {
        self.phishing || self.malware || self.suspicious
    }
}

/// The immutable result of one URL evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    pub id: Uuid,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub safety_score: u8,
    pub status: SafetyStatus,
    pub ssl: SslInfo,
    pub threats: ThreatFlags,
    pub ai_analysis: String,
    pub recommendations: Vec<String>,
}

impl SecurityAnalysis {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.safety_score)
    }
}

/// The shape written by the report exporter. It deliberately omits the record id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedReport<'a> {
    pub url: &'a str,
    pub timestamp: DateTime<Utc>,
    pub safety_score: u8,
    pub status: SafetyStatus,
    pub ssl: &'a SslInfo,
    pub threats: ThreatFlags,
    pub ai_analysis: &'a str,
    pub recommendations: &'a [String],
}

impl<'a> From<&'a SecurityAnalysis> for ExportedReport<'a> {
    fn from(analysis: &'a SecurityAnalysis) -> Self {
        Self {
            url: &analysis.url,
            timestamp: analysis.timestamp,
            safety_score: analysis.safety_score,
            status: analysis.status,
            ssl: &analysis.ssl,
            threats: analysis.threats,
            ai_analysis: &analysis.ai_analysis,
            recommendations: &analysis.recommendations,
        }
    }
}

// --- Findings ---

// The severity level of a finding shown next to a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

// A finding derived from an analysis, resolved against the knowledge base by code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisFinding {
    pub severity: Severity,
    pub code: String,
}

impl AnalysisFinding {
    pub fn new(severity: Severity, code: &str) -> Self {
        Self { severity, code: code.to_string() }
    }
}

// --- Accounts ---

/// A signed-in identity and the scans it owns, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub scan_history: Vec<SecurityAnalysis>,
}

impl Account {
    pub fn new(email: &str, display_name: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            scan_history: Vec::new(),
        }
    }

    /// Prepends `analysis` and drops the oldest entries beyond [`HISTORY_LIMIT`].
    pub fn push_scan(&mut self, analysis: SecurityAnalysis) {
        self.scan_history.insert(0, analysis);
        self.scan_history.truncate(HISTORY_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bands_follow_report_thresholds() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Poor);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Poor);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&SafetyStatus::Dangerous).unwrap();
        assert_eq!(json, "\"dangerous\"");
        assert_eq!("warning".parse::<SafetyStatus>().unwrap(), SafetyStatus::Warning);
    }

    #[test]
    fn account_uses_camel_case_and_tolerates_missing_history() {
        let json = r#"{"id":"0190f0e4-8c1b-7cc0-8000-000000000001","email":"a@b.com","displayName":"a"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.display_name, "a");
        assert!(account.scan_history.is_empty());
    }
}
