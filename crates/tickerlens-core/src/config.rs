//! Widget configuration.
//!
//! Every knob has a default matching the behavior of the hosted page; the
//! CLI overrides them from flags or `TICKERLENS_*` environment variables
//! and then calls [`WidgetConfig::validate`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Location of the ticker directory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DirectoryLocation {
    Url(String),
    File(PathBuf),
}

impl DirectoryLocation {
    /// Anything that looks like an HTTP(S) URL is fetched; everything else is a path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the API serving `/api/sec/...` and `/api/news/...`.
    pub api_base_url: String,
    pub directory: DirectoryLocation,
    pub debounce_ms: u64,
    pub suggestion_limit: usize,
    /// Per-form cap forwarded to the filings endpoint.
    pub filings_top: u8,
    pub news_limit: u8,
    pub http_timeout_ms: u64,
    pub user_agent: String,
    pub extra_headers: BTreeMap<String, String>,
}

pub const SEC_COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

impl Default for WidgetConfig {
    fn default() -> Self {
        let api_base_url = String::from("http://127.0.0.1:8000");
        Self {
            directory: DirectoryLocation::Url(format!(
                "{api_base_url}/static/data/company_tickers.json"
            )),
            api_base_url,
            debounce_ms: 150,
            suggestion_limit: 10,
            filings_top: 4,
            news_limit: 10,
            http_timeout_ms: 10_000,
            user_agent: concat!("tickerlens/", env!("CARGO_PKG_VERSION")).to_owned(),
            extra_headers: BTreeMap::new(),
        }
    }
}

impl WidgetConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse a `name: value` header specification and add it.
    pub fn push_header(&mut self, spec: &str) -> Result<(), ConfigError> {
        let (name, value) = spec
            .split_once(':')
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .ok_or_else(|| ConfigError::InvalidHeader {
                value: spec.to_owned(),
            })?;
        self.extra_headers
            .insert(name.to_ascii_lowercase(), value.to_owned());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.api_base_url.clone(),
            });
        }
        check_range("debounce_ms", self.debounce_ms, 0, 5_000)?;
        check_range("suggestion_limit", self.suggestion_limit as u64, 1, 100)?;
        check_range("filings_top", u64::from(self.filings_top), 1, 10)?;
        check_range("news_limit", u64::from(self.news_limit), 1, 20)?;
        check_range("http_timeout_ms", self.http_timeout_ms, 1, 120_000)?;

        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::InvalidUserAgent {
                value: self.user_agent.clone(),
            });
        }
        for (name, value) in &self.extra_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidHeader {
                    value: format!("{name}: {value}"),
                });
            }
        }
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WidgetConfig::default();
        config.validate().expect("defaults must validate");
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.suggestion_limit, 10);
    }

    #[test]
    fn rejects_news_limit_above_endpoint_cap() {
        let config = WidgetConfig {
            news_limit: 21,
            ..WidgetConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "news_limit",
                ..
            }
        ));
    }

    #[test]
    fn directory_location_distinguishes_urls_from_paths() {
        assert_eq!(
            DirectoryLocation::parse("https://www.sec.gov/files/company_tickers.json"),
            DirectoryLocation::Url(String::from(SEC_COMPANY_TICKERS_URL))
        );
        assert_eq!(
            DirectoryLocation::parse("data/company_tickers.json"),
            DirectoryLocation::File(PathBuf::from("data/company_tickers.json"))
        );
    }

    #[test]
    fn header_specs_require_name_and_value() {
        let mut config = WidgetConfig::default();
        config
            .push_header("User-Agent: Jane Doe jane@example.test")
            .expect("valid header");
        assert_eq!(
            config.extra_headers.get("user-agent").map(String::as_str),
            Some("Jane Doe jane@example.test")
        );
        assert!(config.push_header("no-colon").is_err());
    }

    #[test]
    fn rejects_user_agent_with_control_characters() {
        let config = WidgetConfig {
            user_agent: String::from("Jane Doe\njane@example.test"),
            ..WidgetConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert_eq!(
            err,
            ConfigError::InvalidUserAgent {
                value: String::from("Jane Doe\njane@example.test"),
            }
        );
    }

    #[test]
    fn rejects_extra_headers_reqwest_cannot_send() {
        let mut config = WidgetConfig::default();
        config
            .push_header("X Bad Name: 1")
            .expect("name: value shape parses");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHeader { .. })
        ));

        let mut config = WidgetConfig::default();
        config
            .extra_headers
            .insert(String::from("x-trace"), String::from("a\u{7f}b"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = WidgetConfig {
            api_base_url: String::from("https://lens.example.test/"),
            ..WidgetConfig::default()
        };
        assert_eq!(config.base_url(), "https://lens.example.test");
    }
}
