use serde::Serialize;

use crate::analyzer::{PageAnalysis, analyze_html};
use crate::error::FetchError;
use crate::http::FetchResult;
use crate::pagespeed::PageSpeedMetrics;

/// One analyzed page: a single report row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeoRecord {
    pub url: String,
    pub status_code: Option<u16>,
    pub load_time_seconds: Option<f64>,
    pub size_bytes: Option<u64>,
    /// Present only when the page was fetched and parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagespeed: Option<PageSpeedMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeoRecord {
    /// Build the record for a fetched page, running the HTML analysis on success.
    /// `input` is the URL as listed by the user and fills the URL column.
    pub fn from_fetch(input: &str, fetch: &FetchResult) -> Self {
        let (analysis, error) = match &fetch.body {
            Ok(html) => (Some(analyze_html(html, &fetch.url)), None),
            Err(err) => (None, Some(err.to_string())),
        };
        SeoRecord {
            url: input.to_string(),
            status_code: fetch.status,
            load_time_seconds: fetch
                .load_time
                .map(|elapsed| round_millis(elapsed.as_secs_f64())),
            size_bytes: fetch.size,
            analysis,
            pagespeed: None,
            error,
        }
    }

    /// A record for a URL whose analysis never produced a fetch result
    pub fn failed(input: &str, error: &FetchError) -> Self {
        SeoRecord {
            url: input.to_string(),
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
