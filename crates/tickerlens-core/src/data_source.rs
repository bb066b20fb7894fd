//! Panel data source contract and response schemas.
//!
//! | Endpoint | Request | Response body |
//! |----------|---------|---------------|
//! | Filings | [`FilingsRequest`] | `{ "filings": FilingRecord[] }` |
//! | News | [`NewsRequest`] | `{ "news": NewsRecord[] }` |
//!
//! Bodies are validated here, at the boundary, so a malformed response
//! surfaces as [`SchemaError`] instead of failing halfway through a render.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use crate::{FetchError, FilingRecord, NewsRecord, SchemaError};

/// Endpoint identifier used in logs and schema errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Directory,
    Filings,
    News,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Filings => "filings",
            Self::News => "news",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload for the filings endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingsRequest {
    pub ticker: String,
    /// How many filings per form type the endpoint should consider.
    pub top: u8,
}

impl FilingsRequest {
    pub fn new(ticker: impl Into<String>, top: u8) -> Self {
        Self {
            ticker: ticker.into(),
            top,
        }
    }
}

/// Request payload for the news endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    pub ticker: String,
    pub limit: u8,
}

impl NewsRequest {
    pub fn new(ticker: impl Into<String>, limit: u8) -> Self {
        Self {
            ticker: ticker.into(),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FilingsEnvelope {
    filings: Vec<FilingRecord>,
}

#[derive(Debug, Deserialize)]
struct NewsEnvelope {
    #[serde(default)]
    news: Option<Vec<NewsRecord>>,
}

/// Validate a filings response body. A missing `filings` field is a schema error.
pub fn parse_filings(body: &str) -> Result<Vec<FilingRecord>, SchemaError> {
    serde_json::from_str::<FilingsEnvelope>(body)
        .map(|envelope| envelope.filings)
        .map_err(|e| SchemaError::new(Endpoint::Filings.as_str(), e.to_string()))
}

/// Validate a news response body. A missing or null `news` field reads as no news.
pub fn parse_news(body: &str) -> Result<Vec<NewsRecord>, SchemaError> {
    serde_json::from_str::<NewsEnvelope>(body)
        .map(|envelope| envelope.news.unwrap_or_default())
        .map_err(|e| SchemaError::new(Endpoint::News.as_str(), e.to_string()))
}

/// Source of the two fetch-driven panels.
///
/// One attempt per call; implementations never retry.
pub trait PanelSource: Send + Sync {
    /// Fetches the filing list for a ticker.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on a non-2xx status, a transport failure or a
    /// body that does not match the filings schema.
    fn filings<'a>(
        &'a self,
        req: FilingsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FilingRecord>, FetchError>> + Send + 'a>>;

    /// Fetches recent news for a ticker.
    ///
    /// # Errors
    ///
    /// Same classification as [`filings`](PanelSource::filings).
    fn news<'a>(
        &'a self,
        req: NewsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<NewsRecord>, FetchError>> + Send + 'a>>;
}
