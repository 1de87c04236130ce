//! src/config.rs
//!
//! Runtime configuration, loaded from environment variables at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::logging;

/// Delay between pipeline stages when none is configured.
const DEFAULT_STAGE_DELAY_MS: u64 = 800;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Holds the account files and the log file.
    pub data_dir: PathBuf,
    /// Where exported reports are written.
    pub export_dir: PathBuf,
    pub stage_delay: Duration,
    /// Fixed seed for reproducible scoring.
    pub seed: Option<u64>,
    /// Keep accounts in memory instead of on disk.
    pub ephemeral: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("LINKLENS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(logging::get_data_dir);

        let export_dir = lookup("LINKLENS_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let stage_delay_ms = match lookup("LINKLENS_STAGE_DELAY_MS") {
            Some(raw) => parse_u64("LINKLENS_STAGE_DELAY_MS", &raw)?,
            None => DEFAULT_STAGE_DELAY_MS,
        };

        let seed = lookup("LINKLENS_SEED")
            .map(|raw| parse_u64("LINKLENS_SEED", &raw))
            .transpose()?;

        let ephemeral = match lookup("LINKLENS_EPHEMERAL").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "LINKLENS_EPHEMERAL".to_string(),
                    format!("'{other}' is not a boolean"),
                ));
            }
        };

        Ok(Self {
            data_dir,
            export_dir,
            stage_delay: Duration::from_millis(stage_delay_ms),
            seed,
            ephemeral,
        })
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.stage_delay, Duration::from_millis(800));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.seed, None);
        assert!(!config.ephemeral);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("LINKLENS_DATA_DIR", "/tmp/linklens"),
            ("LINKLENS_STAGE_DELAY_MS", "0"),
            ("LINKLENS_SEED", "42"),
            ("LINKLENS_EPHEMERAL", "true"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/linklens"));
        assert!(config.stage_delay.is_zero());
        assert_eq!(config.seed, Some(42));
        assert!(config.ephemeral);
    }

    #[test]
    fn rejects_invalid_numbers_and_flags() {
        assert!(matches!(
            config_from(&[("LINKLENS_STAGE_DELAY_MS", "fast")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "LINKLENS_STAGE_DELAY_MS"
        ));
        assert!(config_from(&[("LINKLENS_SEED", "-1")]).is_err());
        assert!(config_from(&[("LINKLENS_EPHEMERAL", "maybe")]).is_err());
    }
}
