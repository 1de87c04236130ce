// src/core/scanner/url_validator.rs

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::error::ValidationError;

/// Scheme assumed when the input does not name one.
const DEFAULT_SCHEME: &str = "https://";

lazy_static! {
    // An explicit scheme only counts at the very start of the input.
    static ref LEADING_SCHEME: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("scheme pattern is valid");
}

/// Normalizes raw user input into an absolute URL with a host.
///
/// Input without a leading scheme is prefixed with `https://`; a `://` later in
/// the path or query does not count as one. Anything that does not
/// parse, or parses without a host (e.g. `mailto:`), is rejected.
pub fn normalize_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!("Rejected empty URL input.");
        return Err(ValidationError::Empty);
    }

    let with_scheme = if LEADING_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| {
        warn!(input = trimmed, error = %e, "URL failed to parse.");
        ValidationError::Malformed { input: trimmed.to_string(), reason: e.to_string() }
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {
            debug!(url = %url, host, "URL accepted.");
            Ok(url)
        }
        _ => {
            warn!(input = trimmed, "URL has no host.");
            Err(ValidationError::MissingHost(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_secure_scheme_when_missing() {
        let url = normalize_url("google.com").unwrap();
        assert_eq!(url.as_str(), "https://google.com/");
        assert_eq!(url.host_str(), Some("google.com"));
    }

    #[test]
    fn keeps_explicit_scheme_and_lowercases_host() {
        let url = normalize_url("  http://Example.COM/path?q=1 ").unwrap();
        assert_eq!(url.as_str(), "http://example.com/path?q=1");
    }

    #[test]
    fn nested_scheme_in_query_still_gets_prefixed() {
        let url = normalize_url("example.com/redirect?to=https://evil.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("to=https://evil.com"));
    }

    #[test]
    fn host_with_port_is_not_mistaken_for_a_scheme() {
        let url = normalize_url("example.com:8443/login").unwrap();
        assert_eq!(url.as_str(), "https://example.com:8443/login");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(normalize_url("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_unparseable_input() {
        assert!(matches!(normalize_url("exa mple.com"), Err(ValidationError::Malformed { .. })));
        assert!(matches!(normalize_url("https://"), Err(ValidationError::Malformed { .. })));
    }

    #[test]
    fn rejects_urls_without_host() {
        assert!(matches!(normalize_url("file:///etc/passwd"), Err(ValidationError::MissingHost(_))));
    }
}
