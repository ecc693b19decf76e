use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "job-scout/0.1 (+https://github.com/job-scout)";

/// Finnish regions (maakunnat) as Duunitori spells them in region paths
const REGION_SLUGS: &[&str] = &[
    "ahvenanmaa",
    "etela-karjala",
    "etela-pohjanmaa",
    "etela-savo",
    "kainuu",
    "kanta-hame",
    "keski-pohjanmaa",
    "keski-suomi",
    "kymenlaakso",
    "lappi",
    "paijat-hame",
    "pirkanmaa",
    "pohjanmaa",
    "pohjois-karjala",
    "pohjois-pohjanmaa",
    "pohjois-savo",
    "satakunta",
    "uusimaa",
    "varsinais-suomi",
];

/// Immutable settings for one aggregator instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub markup: MarkupSourceConfig,
    pub api: ApiSourceConfig,
    pub regions: HashSet<String>,
    pub filter: FilterConfig,
    pub max_results: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            markup: MarkupSourceConfig::default(),
            api: ApiSourceConfig::default(),
            regions: REGION_SLUGS.iter().map(|s| s.to_string()).collect(),
            filter: FilterConfig::default(),
            max_results: 500,
        }
    }
}

/// Duunitori settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupSourceConfig {
    pub base_url: String,
    pub search_path: String,
    pub region_path: String,
    pub user_agent: String,
    pub timeout_ms: u64,
    /// Pause after each successful fetch, to stay polite towards the site
    pub pacing_ms: u64,
}

impl Default for MarkupSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://duunitori.fi".to_string(),
            search_path: "tyopaikat".to_string(),
            region_path: "tyopaikat/alue".to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_ms: 12_000,
            pacing_ms: 350,
        }
    }
}

impl MarkupSourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Työmarkkinatori settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSourceConfig {
    pub endpoint: String,
    /// Prefix for links synthesized from record identifiers
    pub detail_url_base: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for ApiSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://paikat.te-palvelut.fi/tpt-api/v1/search".to_string(),
            detail_url_base: "https://tyomarkkinatori.fi/henkiloasiakkaat/avoimet-tyopaikat"
                .to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ApiSourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// How a city location is compared against listing locations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    #[default]
    Substring,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub match_mode: MatchMode,
}

impl AggregatorConfig {
    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AggregatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("markup.base_url", &self.markup.base_url)?;
        validate_url("api.endpoint", &self.api.endpoint)?;
        validate_url("api.detail_url_base", &self.api.detail_url_base)?;

        if self.markup.timeout_ms == 0 || self.api.timeout_ms == 0 {
            return Err(ScrapeError::Config {
                message: "timeouts must be greater than zero".to_string(),
            });
        }
        if self.max_results == 0 {
            return Err(ScrapeError::Config {
                message: "max_results must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str).map_err(|e| ScrapeError::Config {
        message: format!("{}: invalid URL '{}': {}", field_name, url_str, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ScrapeError::Config {
            message: format!("{}: unsupported URL scheme '{}'", field_name, scheme),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AggregatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_results, 500);
        assert_eq!(config.filter.match_mode, MatchMode::Substring);
        assert_eq!(config.regions.len(), 19);
        assert!(config.regions.contains("uusimaa"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AggregatorConfig::from_toml_str(
            r#"
            max_results = 50

            [markup]
            pacing_ms = 0

            [filter]
            match_mode = "exact"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_results, 50);
        assert_eq!(config.markup.pacing_ms, 0);
        assert_eq!(config.markup.base_url, "https://duunitori.fi");
        assert_eq!(config.filter.match_mode, MatchMode::Exact);
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn rejects_bad_scheme() {
        let err = AggregatorConfig::from_toml_str(
            r#"
            [api]
            endpoint = "ftp://example.com/search"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Config { .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = AggregatorConfig::default();
        config.markup.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "regions = [\"uusimaa\", \"lappi\"]").unwrap();

        let config = AggregatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.regions.len(), 2);
        assert!(config.regions.contains("lappi"));
    }
}
