//! Fetching the lookup page for an RC number.
//!
//! [`PageSource`] abstracts over where the page comes from so the rest of
//! the crate can be exercised against saved HTML. [`HttpFetcher`] is the
//! real implementation: one GET per lookup, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::{LookupError, LookupResult};
use crate::types::RcNumber;

/// Default lookup site. The RC number is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "https://vahanx.in/rc-search";

/// Default timeout for the single outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 Chrome/130.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Something that can produce the raw HTML page for an RC number.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the lookup page body. Any failure is a [`LookupError::Network`].
    async fn fetch(&self, rc: &RcNumber) -> LookupResult<String>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// URL prefix; `/{RC}` is appended per lookup.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP page source backed by one long-lived client.
///
/// The client is built once with the browser-like header set and shared by
/// every lookup; nothing in it changes after construction.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> LookupResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Lookup URL for an RC number.
    pub fn url_for(&self, rc: &RcNumber) -> String {
        format!("{}/{}", self.base_url, rc)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, rc: &RcNumber) -> LookupResult<String> {
        let url = self.url_for(rc);
        tracing::debug!(%url, "fetching lookup page");

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(%url, status, bytes = body.len(), "lookup page fetched");
        Ok(body)
    }
}

/// Page source serving fixed HTML, for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait]
impl PageSource for StaticPage {
    async fn fetch(&self, _rc: &RcNumber) -> LookupResult<String> {
        Ok(self.html.clone())
    }
}

/// Page source that always fails with a network error.
#[derive(Debug, Clone)]
pub struct UnreachablePage {
    message: String,
}

impl UnreachablePage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl PageSource for UnreachablePage {
    async fn fetch(&self, _rc: &RcNumber) -> LookupResult<String> {
        Err(LookupError::Network(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rc(s: &str) -> RcNumber {
        RcNumber::parse(Some(s)).unwrap()
    }

    fn fetcher_for(server: &MockServer) -> HttpFetcher {
        HttpFetcher::new(FetchConfig {
            base_url: format!("{}/rc-search/", server.uri()),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_appends_normalized_rc() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        assert_eq!(
            fetcher.url_for(&rc(" dl01ab1234 ")),
            "https://vahanx.in/rc-search/DL01AB1234"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rc-search/DL01AB1234"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher_for(&server).fetch(&rc("dl01ab1234")).await.unwrap();
        assert_eq!(body, "<html>ok</html>");

        // Comma-separated values are compared raw rather than through a matcher.
        let requests = server.received_requests().await.unwrap();
        let sent = |name: &str| {
            requests[0]
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        assert_eq!(sent("accept").as_deref(), Some(ACCEPT));
        assert_eq!(sent("accept-language").as_deref(), Some(ACCEPT_LANGUAGE));
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch(&rc("MH12AB0001")).await.unwrap_err();
        match err {
            LookupError::Network(msg) => assert!(msg.contains("503"), "{msg}"),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(FetchConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(200),
        })
        .unwrap();
        let err = fetcher.fetch(&rc("KA01")).await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        let fetcher = HttpFetcher::new(FetchConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();
        let err = fetcher.fetch(&rc("KA01")).await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }

    #[tokio::test]
    async fn test_static_and_unreachable_sources() {
        let ok = StaticPage::new("<p>x</p>");
        assert_eq!(ok.fetch(&rc("abc")).await.unwrap(), "<p>x</p>");

        let down = UnreachablePage::new("dns failure");
        assert_eq!(
            down.fetch(&rc("abc")).await,
            Err(LookupError::Network("dns failure".into()))
        );
    }
}
