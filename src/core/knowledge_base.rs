//! This module is the static reference data of the analyzer.
//! It holds the reputation lists consulted by the scanner, the narrative
//! templates attached to each verdict, and the catalogue of findings shown
//! next to a report, each with a human-readable explanation and remediation.

use crate::core::models::{AnalysisFinding, SafetyStatus, SecurityAnalysis, Severity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use url::{Host, Url};

/// Well-known domains that short-circuit classification to `safe`.
pub const ALLOW_LIST: &[&str] = &["google.com", "github.com", "stackoverflow.com", "wikipedia.org"];

/// Known-bad domains that short-circuit classification to `dangerous`.
pub const DENY_LIST: &[&str] = &["suspicious-site.com", "malware-test.com", "phishing-example.com"];

/// Certificates expiring within this many days are flagged.
const EXPIRY_WARNING_DAYS: i64 = 30;

lazy_static! {
    // Words commonly planted in lookalike hosts to borrow trust.
    static ref LURE_KEYWORDS: Regex =
        Regex::new(r"(?i)(^|[.-])(login|signin|verify|secure|account|update|wallet|banking)([.-]|$)")
            .expect("lure keyword pattern is valid");
}

/// Returns the first allow-list entry contained in `host`.
pub fn allow_listed(host: &str) -> Option<&'static str> {
    ALLOW_LIST.iter().copied().find(|entry| host.contains(entry))
}

/// Returns the first deny-list entry contained in `host`.
pub fn deny_listed(host: &str) -> Option<&'static str> {
    DENY_LIST.iter().copied().find(|entry| host.contains(entry))
}

// --- Verdict Templates ---

/// The narrative and advice attached to one classification outcome.
pub struct VerdictTemplate {
    /// Paragraph shown as the pattern-analysis summary of the report.
    pub narrative: &'static str,
    /// Advice listed under the narrative, most important first.
    pub recommendations: &'static [&'static str],
}

/// Verdict for allow-listed hosts.
pub static TRUSTED_DOMAIN: VerdictTemplate = VerdictTemplate {
    narrative: "This website appears to be legitimate and safe to visit. The pattern analysis found no suspicious signals, the domain has a strong reputation and it uses proper security measures.",
    recommendations: &[
        "Website is safe to visit",
        "SSL certificate is valid and up-to-date",
        "No malicious activity detected",
        "Domain has good reputation",
    ],
};

/// Verdict for deny-listed hosts.
pub static HOSTILE_DOMAIN: VerdictTemplate = VerdictTemplate {
    narrative: "WARNING: This website shows multiple red flags including suspicious URL patterns, potential phishing indicators and malware signatures. The pattern analysis matched traits commonly associated with malicious websites.",
    recommendations: &[
        "Do not visit this website",
        "Block this domain in your browser",
        "Report as malicious if encountered",
        "Scan your device if you visited this site",
    ],
};

/// Verdict for unknown hosts that are flagged as `warning`.
pub static MIXED_SIGNALS: VerdictTemplate = VerdictTemplate {
    narrative: "This website shows mixed security indicators. It is not definitively malicious, but some caution is advised: the pattern analysis detected minor inconsistencies that warrant attention.",
    recommendations: &[
        "Proceed with caution",
        "Verify website authenticity before entering personal information",
        "Use updated antivirus software",
        "Check URL spelling carefully",
    ],
};

/// Verdict for unknown hosts that pass as `safe`.
pub static CLEAN_UNKNOWN: VerdictTemplate = VerdictTemplate {
    narrative: "This website appears to be legitimate with good security practices. The analysis found no significant security concerns.",
    recommendations: &[
        "Website appears safe to visit",
        "SSL certificate is properly configured",
        "No suspicious activity detected",
        "Standard security precautions recommended",
    ],
};

// --- Finding Catalogue ---

/// High-level grouping of findings in the report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    /// Validity and lifetime of the site's certificate.
    Certificate,
    /// Verdicts of the threat-intelligence feeds.
    Reputation,
    /// Traits of the URL itself, such as its scheme or host form.
    Url,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Certificate => write!(f, "SSL/TLS"),
            FindingCategory::Reputation => write!(f, "Reputation"),
            FindingCategory::Url => write!(f, "URL"),
        }
    }
}

/// Everything needed to present a finding to a user.
pub struct FindingDetail {
    /// Machine-readable identifier, e.g. "THREAT_PHISHING".
    pub code: &'static str,
    /// Short heading shown in the findings list.
    pub title: &'static str,
    /// Section of the report the finding belongs to.
    pub category: FindingCategory,
    /// How strongly the finding counts against the site.
    pub severity: Severity,
    /// What the finding means and why it matters.
    pub description: &'static str,
    /// What the user should do about it.
    pub remediation: &'static str,
}

/// The catalogue of every finding the analyzer can report, keyed by `code`.
///
/// `findings_for` only emits codes listed here.
static FINDINGS: &[FindingDetail] = &[
    // --- Certificate ---
    FindingDetail {
        code: "SSL_INVALID",
        title: "Certificate Not Trusted",
        category: FindingCategory::Certificate,
        severity: Severity::Critical,
        description: "The site's certificate could not be validated. Traffic to it may be intercepted or the site may be impersonating someone else.",
        remediation: "Avoid entering credentials or payment details. If you own the site, renew or reissue the certificate from a trusted authority.",
    },
    FindingDetail {
        code: "SSL_EXPIRING_SOON",
        title: "Certificate Expiring Soon",
        category: FindingCategory::Certificate,
        severity: Severity::Warning,
        description: "The certificate expires within 30 days. Once expired, browsers will show security warnings to every visitor.",
        remediation: "Site owners should renew the certificate or enable automatic renewal with their certificate authority.",
    },
    // --- Reputation ---
    FindingDetail {
        code: "THREAT_PHISHING",
        title: "Phishing Indicators",
        category: FindingCategory::Reputation,
        severity: Severity::Critical,
        description: "Reputation sources associate this site with attempts to steal credentials or personal data by imitating a trusted brand.",
        remediation: "Do not enter any information. Navigate to the real service by typing its address yourself and report the link.",
    },
    FindingDetail {
        code: "THREAT_MALWARE",
        title: "Malware Distribution",
        category: FindingCategory::Reputation,
        severity: Severity::Critical,
        description: "Reputation sources associate this site with distributing malicious software.",
        remediation: "Do not download anything from this site. If you already did, run a full scan with up-to-date antivirus software.",
    },
    FindingDetail {
        code: "THREAT_SUSPICIOUS",
        title: "Suspicious Activity",
        category: FindingCategory::Reputation,
        severity: Severity::Warning,
        description: "The site shows behaviour that is not conclusively malicious but often accompanies scams or compromised pages.",
        remediation: "Proceed carefully and verify the site's identity before sharing personal information.",
    },
    // --- URL Structure ---
    FindingDetail {
        code: "URL_PLAIN_HTTP",
        title: "Unencrypted Connection",
        category: FindingCategory::Url,
        severity: Severity::Warning,
        description: "The URL uses plain HTTP, so anything exchanged with the site travels unencrypted.",
        remediation: "Prefer the HTTPS version of the site and never submit passwords over plain HTTP.",
    },
    FindingDetail {
        code: "URL_IP_HOST",
        title: "Raw IP Address",
        category: FindingCategory::Url,
        severity: Severity::Warning,
        description: "The link points at a bare IP address instead of a domain name, a common trick to hide the real destination.",
        remediation: "Be wary of links that avoid domain names. Confirm with the sender where the link should lead.",
    },
    FindingDetail {
        code: "URL_LURE_KEYWORD",
        title: "Lure Keyword in Host",
        category: FindingCategory::Url,
        severity: Severity::Info,
        description: "The host name contains words such as 'login' or 'verify' that are often used by lookalike domains.",
        remediation: "Check that the rest of the domain really belongs to the organisation you expect.",
    },
];

/// Looks up the full detail for a finding code.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|f| f.code == code)
}

/// Derives the findings shown next to a stored analysis, evaluated at `now`.
///
/// Findings are a presentation of the record; they never feed back into the
/// score or status.
pub fn findings_for(analysis: &SecurityAnalysis, now: DateTime<Utc>) -> Vec<AnalysisFinding> {
    let mut findings = Vec::new();
    let mut push = |code: &str| {
        if let Some(detail) = get_finding_detail(code) {
            findings.push(AnalysisFinding::new(detail.severity, detail.code));
        }
    };

    if analysis.threats.phishing {
        push("THREAT_PHISHING");
    }
    if analysis.threats.malware {
        push("THREAT_MALWARE");
    }
    if analysis.threats.suspicious {
        push("THREAT_SUSPICIOUS");
    }

    if !analysis.ssl.valid {
        push("SSL_INVALID");
    } else if let Some(expires) = analysis.ssl.expires {
        let days_left = expires.signed_duration_since(now).num_days();
        if (0..=EXPIRY_WARNING_DAYS).contains(&days_left) {
            push("SSL_EXPIRING_SOON");
        }
    }

    if let Ok(url) = Url::parse(&analysis.url) {
        if url.scheme() == "http" {
            push("URL_PLAIN_HTTP");
        }
        match url.host() {
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => push("URL_IP_HOST"),
            Some(Host::Domain(domain)) if LURE_KEYWORDS.is_match(domain) => push("URL_LURE_KEYWORD"),
            _ => {}
        }
    }

    findings
}

/// Counts findings by severity as `(critical, warning)`.
pub fn severity_counts(findings: &[AnalysisFinding]) -> (usize, usize) {
    let critical = findings.iter().filter(|f| f.severity == Severity::Critical).count();
    let warning = findings.iter().filter(|f| f.severity == Severity::Warning).count();
    (critical, warning)
}

/// Short label used for a status in lists.
pub fn status_label(status: SafetyStatus) -> &'static str {
    match status {
        SafetyStatus::Safe => "Safe",
        SafetyStatus::Warning => "Warning",
        SafetyStatus::Dangerous => "Dangerous",
        SafetyStatus::Unknown => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{SslInfo, ThreatFlags};
    use chrono::Duration;
    use uuid::Uuid;

    fn analysis(url: &str, ssl: SslInfo, threats: ThreatFlags) -> SecurityAnalysis {
        SecurityAnalysis {
            id: Uuid::now_v7(),
            url: url.to_string(),
            timestamp: Utc::now(),
            safety_score: 70,
            status: SafetyStatus::Warning,
            ssl,
            threats,
            ai_analysis: String::new(),
            recommendations: Vec::new(),
        }
    }

    fn valid_ssl(expires_in_days: i64) -> SslInfo {
        SslInfo {
            valid: true,
            issuer: "DigiCert Inc".to_string(),
            expires: Some(Utc::now() + Duration::days(expires_in_days)),
        }
    }

    fn codes(findings: &[AnalysisFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.code.as_str()).collect()
    }

    #[test]
    fn lists_match_by_substring() {
        assert_eq!(allow_listed("www.google.com"), Some("google.com"));
        assert_eq!(allow_listed("en.wikipedia.org"), Some("wikipedia.org"));
        assert_eq!(allow_listed("example.com"), None);
        assert_eq!(deny_listed("cdn.malware-test.com"), Some("malware-test.com"));
        assert_eq!(deny_listed("github.com"), None);
    }

    #[test]
    fn every_derived_code_is_catalogued() {
        let threats = ThreatFlags { phishing: true, malware: true, suspicious: true };
        let a = analysis("http://192.168.0.1/", SslInfo { valid: false, issuer: String::new(), expires: None }, threats);
        let findings = findings_for(&a, Utc::now());
        assert_eq!(
            codes(&findings),
            vec!["THREAT_PHISHING", "THREAT_MALWARE", "THREAT_SUSPICIOUS", "SSL_INVALID", "URL_PLAIN_HTTP", "URL_IP_HOST"]
        );
        assert_eq!(severity_counts(&findings), (3, 3));
    }

    #[test]
    fn expiring_certificate_is_flagged_only_inside_window() {
        let soon = analysis("https://example.com/", valid_ssl(10), ThreatFlags::default());
        assert_eq!(codes(&findings_for(&soon, Utc::now())), vec!["SSL_EXPIRING_SOON"]);

        let later = analysis("https://example.com/", valid_ssl(200), ThreatFlags::default());
        assert!(findings_for(&later, Utc::now()).is_empty());
    }

    #[test]
    fn lure_keywords_are_detected_in_host_labels() {
        let a = analysis("https://secure-login.example.net/", valid_ssl(200), ThreatFlags::default());
        assert_eq!(codes(&findings_for(&a, Utc::now())), vec!["URL_LURE_KEYWORD"]);

        let b = analysis("https://loginov.example.net/", valid_ssl(200), ThreatFlags::default());
        assert!(findings_for(&b, Utc::now()).is_empty());
    }

    #[test]
    fn categories_render_as_report_section_labels() {
        let label = |code: &str| get_finding_detail(code).map(|d| format!("[{}]", d.category));
        assert_eq!(label("SSL_INVALID").as_deref(), Some("[SSL/TLS]"));
        assert_eq!(label("THREAT_MALWARE").as_deref(), Some("[Reputation]"));
        assert_eq!(label("URL_IP_HOST").as_deref(), Some("[URL]"));
        assert_eq!(label("NOT_A_CODE"), None);
    }
}
