//! Dashboard configuration (TOML).
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! NSE + Yahoo setup with daily symbol refresh and hourly history refresh.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::{Bandwidth, DEFAULT_SAMPLE_COUNT};
use crate::dashboard::AnalyticsSettings;
use crate::data::nse::DEFAULT_LISTING_URL;
use crate::data::yahoo::{DEFAULT_CHART_BASE_URL, DEFAULT_QUOTE_SUMMARY_BASE_URL};
use crate::domain::LookbackPeriod;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// NSE equity listing CSV.
    pub symbols_url: String,
    /// Yahoo v8 chart endpoint (symbol is appended).
    pub chart_base_url: String,
    /// Yahoo v10 quoteSummary endpoint (symbol is appended).
    pub quote_summary_base_url: String,
    /// Appended to bare NSE symbols to form Yahoo tickers.
    pub exchange_suffix: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub symbols_ttl_secs: u64,
    pub history_ttl_secs: u64,
    /// KDE evaluation points.
    pub density_samples: usize,
    /// Histogram bins; Sturges' rule when absent.
    pub histogram_bins: Option<usize>,
    pub bandwidth: Bandwidth,
    pub default_period: LookbackPeriod,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbols_url: DEFAULT_LISTING_URL.to_string(),
            chart_base_url: DEFAULT_CHART_BASE_URL.to_string(),
            quote_summary_base_url: DEFAULT_QUOTE_SUMMARY_BASE_URL.to_string(),
            exchange_suffix: ".NS".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 30,
            symbols_ttl_secs: 86_400,
            history_ttl_secs: 3_600,
            density_samples: DEFAULT_SAMPLE_COUNT,
            histogram_bins: None,
            bandwidth: Bandwidth::Scott,
            default_period: LookbackPeriod::OneYear,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density_samples == 0 {
            return Err(ConfigError::Invalid("density_samples must be at least 1".into()));
        }
        if self.histogram_bins == Some(0) {
            return Err(ConfigError::Invalid("histogram_bins must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        if self.symbols_ttl_secs == 0 || self.history_ttl_secs == 0 {
            return Err(ConfigError::Invalid("cache TTLs must be positive".into()));
        }
        if let Bandwidth::Fixed(h) = self.bandwidth {
            if !(h.is_finite() && h > 0.0) {
                return Err(ConfigError::Invalid(format!("fixed bandwidth {h} must be positive")));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn symbols_ttl(&self) -> Duration {
        Duration::from_secs(self.symbols_ttl_secs)
    }

    pub fn history_ttl(&self) -> Duration {
        Duration::from_secs(self.history_ttl_secs)
    }

    pub fn analytics(&self) -> AnalyticsSettings {
        AnalyticsSettings {
            density_samples: self.density_samples,
            histogram_bins: self.histogram_bins,
            bandwidth: self.bandwidth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.symbols_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.history_ttl(), Duration::from_secs(3_600));
        assert_eq!(config.density_samples, 100);
    }

    #[test]
    fn overrides_are_applied() {
        let config = DashboardConfig::from_toml(
            r#"
            exchange_suffix = ".BO"
            density_samples = 200
            histogram_bins = 30
            bandwidth = "silverman"
            default_period = "6mo"
            "#,
        )
        .unwrap();
        assert_eq!(config.exchange_suffix, ".BO");
        assert_eq!(config.density_samples, 200);
        assert_eq!(config.histogram_bins, Some(30));
        assert_eq!(config.bandwidth, Bandwidth::Silverman);
        assert_eq!(config.default_period, LookbackPeriod::SixMonths);
    }

    #[test]
    fn fixed_bandwidth_table() {
        let config = DashboardConfig::from_toml("bandwidth = { fixed = 0.004 }").unwrap();
        assert_eq!(config.bandwidth, Bandwidth::Fixed(0.004));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let err = DashboardConfig::from_toml("density_samples = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_period_is_a_parse_error() {
        let err = DashboardConfig::from_toml("default_period = \"2w\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DashboardConfig::load(Path::new("/nonexistent/flamingo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(DashboardConfig::load_or_default(None).is_ok());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = std::env::temp_dir().join(format!("flamingo_config_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("flamingo.toml");
        std::fs::write(&path, "history_ttl_secs = 60\n").unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.history_ttl(), Duration::from_secs(60));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
