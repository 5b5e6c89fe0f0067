use std::time::Duration;

use ::async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;

use crate::error::*;
use crate::model::Url;

/// Source of raw problem pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            user_agent: HttpClient::DEFAULT_USER_AGENT.to_owned(),
            timeout: HttpClient::DEFAULT_TIMEOUT,
        }
    }
}

/// [`PageFetcher`] over HTTPS. One attempt per request, no retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: ::reqwest::Client,
}

impl HttpClient {
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(opts: &HttpClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        let inner = ::reqwest::Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .timeout(opts.timeout)
            .gzip(true)
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let resp = self.inner.get(url.clone()).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedResponseCode {
                got: status,
                expected: StatusCode::OK,
                requested_url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::ParseFailure {
            problem: url.to_string(),
            reason: format!("response body is not valid UTF-8 ({})", e),
        })
    }
}
