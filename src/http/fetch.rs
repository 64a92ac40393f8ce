use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::constants::HTML_CONTENT_TYPES;
use crate::error::FetchError;

/// Raw outcome of retrieving one URL, before any HTML analysis
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub url: Url,
    /// Status of the final response, if one arrived
    pub status: Option<u16>,
    /// Wall-clock time of the last attempt, body included
    pub load_time: Option<Duration>,
    /// Body size in bytes
    pub size: Option<u64>,
    pub body: Result<String, FetchError>,
}

impl FetchResult {
    pub fn failed(url: Url, error: FetchError) -> Self {
        FetchResult {
            url,
            status: None,
            load_time: None,
            size: None,
            body: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.is_ok()
    }
}

/// Source of page HTML. Failures are reported inside the result, never raised.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchResult;
}

/// Fetches pages over HTTP(S) with retries on transport errors
pub struct HttpFetcher {
    client: Client,
    retry: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(client: Client, retry: u32, retry_delay: Duration) -> Self {
        HttpFetcher {
            client,
            retry,
            retry_delay,
        }
    }

    async fn fetch_once(&self, url: &Url, start: Instant) -> Result<FetchResult, reqwest::Error> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let bytes = resp.bytes().await?;
        let elapsed = start.elapsed();

        let body = if !status.is_success() {
            Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            })
        } else if let Some(content_type) = content_type
            .as_deref()
            .filter(|ct| !is_html_content_type(ct))
        {
            Err(FetchError::UnsupportedContentType(content_type.to_string()))
        } else {
            Ok(decode_body(&bytes, content_type.as_deref()))
        };

        Ok(FetchResult {
            url: url.clone(),
            status: Some(status.as_u16()),
            load_time: Some(elapsed),
            size: Some(bytes.len() as u64),
            body,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        let mut attempts = 0;
        loop {
            if attempts > 0 && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }

            let start_time = Instant::now();
            match self.fetch_once(url, start_time).await {
                Ok(result) => {
                    debug!(url = %url, status = ?result.status, elapsed = ?result.load_time, "fetched page");
                    return result;
                }
                Err(err) => {
                    attempts += 1;
                    if attempts <= self.retry {
                        warn!(url = %url, attempt = attempts, error = %err, "request failed, retrying");
                        continue;
                    }
                    let mut result = FetchResult::failed(url.clone(), classify_error(&err));
                    result.load_time = Some(start_time.elapsed());
                    return result;
                }
            }
        }
    }
}

/// True for `text/html` and `application/xhtml+xml`, ignoring parameters and case
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    HTML_CONTENT_TYPES.contains(&mime.as_str())
}

/// Decode a body using the `charset` of its content type, defaulting to UTF-8.
/// A byte order mark takes precedence over the declared charset.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

fn classify_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    // reqwest's top-level message omits the cause (DNS, refused, TLS, ...)
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    FetchError::Request(message)
}
