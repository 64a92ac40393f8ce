use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::Settings;
use crate::constants::PAGESPEED_ENDPOINT;
use crate::http::base_client_builder;
use crate::types::PageSpeedStrategy;

/// PageSpeed Insights runs a full Lighthouse audit, which is slow
pub const PAGESPEED_TIMEOUT_SECS: u64 = 90;

/// Lighthouse figures reported for one URL
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageSpeedMetrics {
    pub score: Option<f64>,
    pub lcp: Option<String>,
    pub cls: Option<String>,
    pub fid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageSpeedMetrics {
    fn failed(message: impl Into<String>) -> Self {
        PageSpeedMetrics {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

pub struct PageSpeedClient {
    client: Client,
    api_key: Option<String>,
    strategy: PageSpeedStrategy,
    endpoint: Url,
}

impl PageSpeedClient {
    pub fn new(api_key: Option<String>, strategy: PageSpeedStrategy) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PAGESPEED_TIMEOUT_SECS))
            .build()?;
        Self::with_parts(client, api_key, strategy)
    }

    /// Build the client for `--pagespeed` runs, going through the same user
    /// agent, proxy and TLS settings as page fetches. `None` when disabled.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some(pagespeed) = &settings.pagespeed else {
            return Ok(None);
        };
        let client = base_client_builder(settings)?
            .timeout(Duration::from_secs(PAGESPEED_TIMEOUT_SECS))
            .build()?;
        Self::with_parts(client, pagespeed.api_key.clone(), pagespeed.strategy).map(Some)
    }

    fn with_parts(
        client: Client,
        api_key: Option<String>,
        strategy: PageSpeedStrategy,
    ) -> Result<Self> {
        Ok(PageSpeedClient {
            client,
            api_key,
            strategy,
            endpoint: Url::parse(PAGESPEED_ENDPOINT)?,
        })
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn request_url(&self, target: &Url, api_key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", target.as_str())
            .append_pair("key", api_key)
            .append_pair("strategy", self.strategy.as_str());
        url
    }

    /// Query PageSpeed Insights for `target`. Errors end up in `metrics.error`.
    pub async fn analyze(&self, target: &Url) -> PageSpeedMetrics {
        let Some(api_key) = self.api_key.as_deref() else {
            return PageSpeedMetrics::failed("No API key set");
        };

        let request_url = self.request_url(target, api_key);
        let resp = match self.client.get(request_url).send().await {
            Ok(resp) => resp,
            Err(err) => return PageSpeedMetrics::failed(err.to_string()),
        };
        let status = resp.status();
        let data = match resp.json::<Value>().await {
            Ok(data) => data,
            Err(err) => return PageSpeedMetrics::failed(format!("HTTP {}: {}", status, err)),
        };

        if let Some(message) = data.pointer("/error/message").and_then(Value::as_str) {
            return PageSpeedMetrics::failed(message);
        }
        if !status.is_success() {
            return PageSpeedMetrics::failed(format!("HTTP {}", status));
        }

        debug!(url = %target, "received PageSpeed Insights result");
        parse_response(&data)
    }
}

/// Extract the performance score and key audits from a PageSpeed v5 response
pub fn parse_response(data: &Value) -> PageSpeedMetrics {
    let display_value = |audit: &str| {
        data.pointer(&format!("/lighthouseResult/audits/{}/displayValue", audit))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    PageSpeedMetrics {
        score: data
            .pointer("/lighthouseResult/categories/performance/score")
            .and_then(Value::as_f64),
        lcp: display_value("largest-contentful-paint"),
        cls: display_value("cumulative-layout-shift"),
        // First Input Delay is not a lab metric; Time to Interactive stands in for it.
        fid: display_value("interactive"),
        error: None,
    }
}
