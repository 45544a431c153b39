use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentSettings {
    pub volatility_window: usize,
    pub breadcrumb_delimiter: String,
    pub uncategorized_label: String,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            volatility_window: 5,
            breadcrumb_delimiter: "›".to_string(),
            uncategorized_label: "Uncategorized".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleSettings {
    pub short_window: usize,
    pub long_window: usize,
    pub threshold: f64,
}

impl Default for SaleSettings {
    fn default() -> Self {
        Self {
            short_window: 3,
            long_window: 30,
            threshold: 0.88,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub days: usize,
    pub trend_start: f64,
    pub trend_end: f64,
    pub noise_pct: f64,
    pub drop_min_pct: f64,
    pub drop_span_pct: f64,
    pub price_floor: f64,
    pub fallback_base_price: f64,
    pub sale: SaleSettings,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            days: 90,
            trend_start: 1.05,
            trend_end: 0.95,
            noise_pct: 0.03,
            drop_min_pct: 0.12,
            drop_span_pct: 0.20,
            price_floor: 0.5,
            fallback_base_price: 20.0,
            sale: SaleSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub no_regret_quantile: f64,
    pub sentiment_threshold: f64,
    pub return_rate_factor: f64,
    pub return_rate_cap: f64,
    pub was_price_markup: f64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            no_regret_quantile: 0.10,
            sentiment_threshold: 0.1,
            return_rate_factor: 0.2,
            return_rate_cap: 0.25,
            was_price_markup: 1.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorChannel {
    pub name: String,
    pub offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewSettings {
    pub high_risk_sentiment: f64,
    pub high_risk_limit: usize,
    pub sentiment_bins: usize,
    pub selector_title_chars: usize,
}

impl Default for OverviewSettings {
    fn default() -> Self {
        Self {
            high_risk_sentiment: 0.2,
            high_risk_limit: 5,
            sentiment_bins: 20,
            selector_title_chars: 80,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enrichment: EnrichmentSettings,
    pub history: HistorySettings,
    pub metrics: MetricsSettings,
    pub competitors: Vec<CompetitorChannel>,
    pub overview: OverviewSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enrichment: EnrichmentSettings::default(),
            history: HistorySettings::default(),
            metrics: MetricsSettings::default(),
            competitors: default_competitors(),
            overview: OverviewSettings::default(),
        }
    }
}

fn default_competitors() -> Vec<CompetitorChannel> {
    [
        ("Official Website", -0.05),
        ("JD.com", 0.07),
        ("Suning", 0.25),
        ("Tmall Official", 0.25),
    ]
    .into_iter()
    .map(|(name, offset)| CompetitorChannel {
        name: name.to_string(),
        offset,
    })
    .collect()
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.enrichment.volatility_window == 0 {
            return Err(invalid("enrichment.volatility_window", "must be at least 1"));
        }
        if self.enrichment.breadcrumb_delimiter.is_empty() {
            return Err(invalid("enrichment.breadcrumb_delimiter", "must not be empty"));
        }
        if self.enrichment.uncategorized_label.trim().is_empty() {
            return Err(invalid("enrichment.uncategorized_label", "must not be blank"));
        }
        if self.history.days == 0 {
            return Err(invalid("history.days", "must be at least 1"));
        }
        if !(self.history.noise_pct >= 0.0 && self.history.noise_pct.is_finite()) {
            return Err(invalid("history.noise_pct", "must be a non-negative number"));
        }
        if !(self.history.fallback_base_price >= 0.0) {
            return Err(invalid("history.fallback_base_price", "must be non-negative"));
        }
        if self.history.sale.short_window == 0 || self.history.sale.long_window == 0 {
            return Err(invalid("history.sale", "windows must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.metrics.no_regret_quantile) {
            return Err(invalid("metrics.no_regret_quantile", "must lie in [0, 1]"));
        }
        if self.overview.sentiment_bins == 0 {
            return Err(invalid("overview.sentiment_bins", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.days, 90);
        assert_eq!(config.competitors.len(), 4);
        assert_eq!(config.competitors[1].name, "JD.com");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "history:\n  days: 30\nmetrics:\n  no_regret_quantile: 0.2\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.history.days, 30);
        assert_eq!(config.history.price_floor, 0.5);
        assert_eq!(config.metrics.no_regret_quantile, 0.2);
        assert_eq!(config.enrichment.uncategorized_label, "Uncategorized");
        assert_eq!(config.competitors.len(), 4);
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut config = Config::default();
        config.history.days = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "history.days", .. })
        ));
    }
}
