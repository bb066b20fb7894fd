//! In-memory universe of searchable symbols.
//!
//! The ticker directory is a JSON object keyed by arbitrary identifiers:
//!
//! ```json
//! {"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}, ...}
//! ```
//!
//! Records keep the document's key order (serde_json is built with
//! `preserve_order`), and duplicate tickers are kept as they appear.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::DirectoryLocation;
use crate::data_source::Endpoint;
use crate::http_client::{HttpClient, HttpRequest};
use crate::{LoadError, SchemaError, SymbolRecord, Ticker, WidgetConfig};

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    ticker: String,
    title: String,
}

/// Read-only symbol index shared by every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    records: Vec<SymbolRecord>,
}

impl SymbolIndex {
    pub fn new(records: Vec<SymbolRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a directory document into records, in document order.
    pub fn parse_directory(body: &str) -> Result<Vec<SymbolRecord>, SchemaError> {
        let schema_error = |detail: String| SchemaError::new(Endpoint::Directory.as_str(), detail);

        let entries: Map<String, Value> =
            serde_json::from_str(body).map_err(|e| schema_error(e.to_string()))?;

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let entry: DirectoryEntry = serde_json::from_value(value)
                .map_err(|e| schema_error(format!("entry '{key}': {e}")))?;
            match Ticker::parse(&entry.ticker) {
                Ok(symbol) => records.push(SymbolRecord::new(symbol, entry.title)),
                Err(error) => debug!(%key, ticker = %entry.ticker, %error, "skipping directory entry"),
            }
        }
        Ok(records)
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose symbol equals `symbol` exactly.
    pub fn lookup(&self, symbol: &str) -> Option<&SymbolRecord> {
        self.records
            .iter()
            .find(|record| record.symbol.as_str() == symbol)
    }
}

/// Fetches the ticker directory from a URL or a local file.
#[derive(Clone)]
pub struct DirectoryLoader {
    http_client: Arc<dyn HttpClient>,
    headers: BTreeMap<String, String>,
    timeout_ms: u64,
}

impl DirectoryLoader {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            headers: BTreeMap::new(),
            timeout_ms: 10_000,
        }
    }

    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &WidgetConfig) -> Self {
        Self {
            http_client,
            headers: config.extra_headers.clone(),
            timeout_ms: config.http_timeout_ms,
        }
    }

    /// One fetch of the directory, mapped into records.
    pub async fn load(&self, location: &DirectoryLocation) -> Result<Vec<SymbolRecord>, LoadError> {
        let body = match location {
            DirectoryLocation::Url(url) => self.fetch(url).await?,
            DirectoryLocation::File(path) => read_file(path).await?,
        };
        Ok(SymbolIndex::parse_directory(&body)?)
    }

    /// Load the index, degrading to an empty index on any failure.
    ///
    /// The failure is logged and never reaches the user; suggestions simply
    /// stay empty.
    pub async fn load_or_empty(&self, location: &DirectoryLocation) -> SymbolIndex {
        match self.load(location).await {
            Ok(records) => {
                info!(count = records.len(), "symbol index loaded");
                SymbolIndex::new(records)
            }
            Err(error) => {
                warn!(%error, "failed to load tickers; suggestions disabled");
                SymbolIndex::empty()
            }
        }
    }

    /// Download the directory from `source_url` and store it pretty-printed
    /// at `dest`. Returns the number of usable records.
    pub async fn refresh(&self, source_url: &str, dest: &Path) -> Result<usize, LoadError> {
        let body = self.fetch(source_url).await?;
        let count = SymbolIndex::parse_directory(&body)?.len();

        let document: Value = serde_json::from_str(&body)
            .map_err(|e| SchemaError::new(Endpoint::Directory.as_str(), e.to_string()))?;
        let pretty = serde_json::to_string_pretty(&document)
            .map_err(|e| SchemaError::new(Endpoint::Directory.as_str(), e.to_string()))?;

        let io_error = |source: std::io::Error| LoadError::Io {
            path: dest.display().to_string(),
            source,
        };
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(dest, pretty).await.map_err(io_error)?;

        info!(count, dest = %dest.display(), "ticker directory refreshed");
        Ok(count)
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        debug!(%url, "fetching ticker directory");
        let request = HttpRequest::get(url)
            .with_headers(&self.headers)
            .with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(LoadError::Status {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

async fn read_file(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse, StaticHttpClient};

    const DIRECTORY: &str = r#"{
        "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
        "1": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"},
        "10": {"cik_str": 1067983, "ticker": "BRK-B", "title": "BERKSHIRE HATHAWAY INC"},
        "2": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc. duplicate"}
    }"#;

    #[test]
    fn parse_keeps_document_order_and_duplicates() {
        let records = SymbolIndex::parse_directory(DIRECTORY).expect("directory should parse");
        let symbols = records
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "BRK-B", "AAPL"]);
    }

    #[test]
    fn lookup_returns_first_match() {
        let index = SymbolIndex::new(SymbolIndex::parse_directory(DIRECTORY).expect("valid"));
        assert_eq!(index.lookup("AAPL").map(|r| r.name.as_str()), Some("Apple Inc."));
        assert!(index.lookup("aapl").is_none());
    }

    #[test]
    fn blank_tickers_are_skipped() {
        let records = SymbolIndex::parse_directory(
            r#"{"0":{"ticker":" ","title":"Nobody"},"1":{"ticker":"ibm","title":"IBM"}}"#,
        )
        .expect("valid");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol.as_str(), "IBM");
    }

    #[test]
    fn entry_without_title_is_schema_error() {
        let err = SymbolIndex::parse_directory(r#"{"0":{"ticker":"IBM"}}"#).expect_err("must fail");
        assert!(err.detail.contains("entry '0'"));
    }

    #[tokio::test]
    async fn load_or_empty_degrades_on_transport_failure() {
        let client = Arc::new(
            StaticHttpClient::new()
                .route_error("https://dir.test/", HttpError::new("connection failed")),
        );
        let loader = DirectoryLoader::new(client);

        let index = loader
            .load_or_empty(&DirectoryLocation::Url(String::from("https://dir.test/tickers.json")))
            .await;

        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn load_reports_status_failure() {
        let client = Arc::new(
            StaticHttpClient::new().route("https://dir.test/", HttpResponse::with_status(503, "")),
        );
        let loader = DirectoryLoader::new(client);

        let err = loader
            .load(&DirectoryLocation::Url(String::from("https://dir.test/tickers.json")))
            .await
            .expect_err("503 must fail");
        assert!(matches!(err, LoadError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn refresh_writes_file_that_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("data").join("company_tickers.json");
        let client = Arc::new(
            StaticHttpClient::new().route("https://sec.test/", HttpResponse::ok_json(DIRECTORY)),
        );
        let loader = DirectoryLoader::new(client);

        let count = loader
            .refresh("https://sec.test/files/company_tickers.json", &dest)
            .await
            .expect("refresh should succeed");
        let reloaded = loader
            .load(&DirectoryLocation::File(dest.clone()))
            .await
            .expect("written file should load");

        assert_eq!(count, 4);
        assert_eq!(reloaded[2].symbol.as_str(), "BRK-B");
    }

    #[tokio::test]
    async fn refresh_rejects_malformed_directory_without_writing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("company_tickers.json");
        let client = Arc::new(
            StaticHttpClient::new().route("https://sec.test/", HttpResponse::ok_json("[1,2,3]")),
        );
        let loader = DirectoryLoader::new(client);

        let err = loader
            .refresh("https://sec.test/files/company_tickers.json", &dest)
            .await
            .expect_err("array is not a directory");

        assert!(matches!(err, LoadError::Schema(_)));
        assert!(!dest.exists());
    }
}
