// src/core/export.rs

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::models::{ExportedReport, SecurityAnalysis};
use crate::error::ExportError;

/// File name of a report exported at `exported_at`.
pub fn report_file_name(exported_at: DateTime<Utc>) -> String {
    format!("linklens-report-{}.json", exported_at.timestamp_millis())
}

/// Writes `analysis` as pretty JSON into `dir` and returns the created path.
///
/// This is a one-way export; the file is never read back.
pub fn export_report(
    analysis: &SecurityAnalysis,
    dir: &Path,
    exported_at: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(exported_at));
    let json = serde_json::to_string_pretty(&ExportedReport::from(analysis))?;
    fs::write(&path, json)?;
    info!(path = %path.display(), url = %analysis.url, "Report exported.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{SafetyStatus, SslInfo, ThreatFlags};
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn writes_exactly_the_report_fields() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = SecurityAnalysis {
            id: Uuid::now_v7(),
            url: "https://github.com/".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap(),
            safety_score: 93,
            status: SafetyStatus::Safe,
            ssl: SslInfo { valid: true, issuer: "Let's Encrypt".to_string(), expires: None },
            threats: ThreatFlags::default(),
            ai_analysis: "Looks fine.".to_string(),
            recommendations: vec!["Website is safe to visit".to_string()],
        };
        let exported_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let path = export_report(&analysis, dir.path(), exported_at).unwrap();
        assert_eq!(path.file_name().unwrap(), "linklens-report-1700000000123.json");

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["aiAnalysis", "recommendations", "safetyScore", "ssl", "status", "threats", "timestamp", "url"]
        );
        assert_eq!(value["status"], "safe");
        assert_eq!(value["safetyScore"], 93);
        assert_eq!(value["ssl"]["issuer"], "Let's Encrypt");
        assert_eq!(value["threats"]["phishing"], false);
    }
}
