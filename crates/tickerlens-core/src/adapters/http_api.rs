use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::data_source::{parse_filings, parse_news, Endpoint, FilingsRequest, NewsRequest, PanelSource};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{FetchError, FilingRecord, NewsRecord, WidgetConfig};

/// Panel source backed by the widget's HTTP API.
#[derive(Clone)]
pub struct HttpApiSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    headers: BTreeMap<String, String>,
    timeout_ms: u64,
}

impl HttpApiSource {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            headers: BTreeMap::new(),
            timeout_ms: 10_000,
        }
    }

    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &WidgetConfig) -> Self {
        Self {
            headers: config.extra_headers.clone(),
            timeout_ms: config.http_timeout_ms,
            ..Self::new(http_client, config.base_url())
        }
    }

    /// Production source using reqwest with the configured user agent.
    pub fn with_real_client(config: &WidgetConfig) -> Self {
        Self::from_config(Arc::new(ReqwestHttpClient::new(&config.user_agent)), config)
    }

    pub fn filings_url(&self, req: &FilingsRequest) -> String {
        format!(
            "{}/api/sec/sec_doc_urls?ticker={}&top={}",
            self.base_url,
            urlencoding::encode(&req.ticker),
            req.top
        )
    }

    pub fn news_url(&self, req: &NewsRequest) -> String {
        format!(
            "{}/api/news/stock_news?ticker={}&limit={}",
            self.base_url,
            urlencoding::encode(&req.ticker),
            req.limit
        )
    }

    async fn get_body(&self, endpoint: Endpoint, url: String) -> Result<String, FetchError> {
        debug!(%endpoint, %url, "fetching panel data");
        let request = HttpRequest::get(url)
            .with_headers(&self.headers)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

impl PanelSource for HttpApiSource {
    fn filings<'a>(
        &'a self,
        req: FilingsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FilingRecord>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.get_body(Endpoint::Filings, self.filings_url(&req)).await?;
            Ok(parse_filings(&body)?)
        })
    }

    fn news<'a>(
        &'a self,
        req: NewsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<NewsRecord>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.get_body(Endpoint::News, self.news_url(&req)).await?;
            Ok(parse_news(&body)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse, StaticHttpClient};

    const BASE: &str = "https://lens.example.test";

    fn source(client: StaticHttpClient) -> (Arc<StaticHttpClient>, HttpApiSource) {
        let client = Arc::new(client);
        let source = HttpApiSource::new(client.clone(), format!("{BASE}/"));
        (client, source)
    }

    #[tokio::test]
    async fn ticker_is_url_encoded_in_query() {
        let (client, source) = source(StaticHttpClient::new().route(
            format!("{BASE}/api/sec/sec_doc_urls"),
            HttpResponse::ok_json(r#"{"filings":[]}"#),
        ));

        let filings = source
            .filings(FilingsRequest::new("BRK&B", 4))
            .await
            .expect("empty list is fine");

        assert!(filings.is_empty());
        assert_eq!(
            client.recorded_urls(),
            vec![format!("{BASE}/api/sec/sec_doc_urls?ticker=BRK%26B&top=4")]
        );
    }

    #[tokio::test]
    async fn non_2xx_maps_to_status_error() {
        let (_, source) = source(StaticHttpClient::new().route(
            format!("{BASE}/api/news/stock_news"),
            HttpResponse::with_status(500, r#"{"detail":"boom"}"#),
        ));

        let err = source
            .news(NewsRequest::new("AAPL", 10))
            .await
            .expect_err("500 must fail");
        assert_eq!(err, FetchError::Status { status: 500 });
    }

    #[tokio::test]
    async fn transport_failure_is_preserved() {
        let (_, source) = source(StaticHttpClient::new().route_error(
            format!("{BASE}/api/sec/sec_doc_urls"),
            HttpError::new("connection failed: refused"),
        ));

        let err = source
            .filings(FilingsRequest::new("AAPL", 4))
            .await
            .expect_err("transport must fail");
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[tokio::test]
    async fn configured_headers_are_sent() {
        let client = Arc::new(StaticHttpClient::new().route(
            format!("{BASE}/api/news/stock_news"),
            HttpResponse::ok_json(r#"{"news":[]}"#),
        ));
        let mut config = WidgetConfig {
            api_base_url: String::from(BASE),
            ..WidgetConfig::default()
        };
        config
            .push_header("X-Client: widget")
            .expect("valid header");
        let source = HttpApiSource::from_config(client.clone(), &config);

        source
            .news(NewsRequest::new("MSFT", 5))
            .await
            .expect("news should load");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].headers.get("x-client").map(String::as_str), Some("widget"));
        assert_eq!(requests[0].timeout_ms, config.http_timeout_ms);
    }
}
