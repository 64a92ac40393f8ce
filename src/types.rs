use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use crate::utils::DelayRange;

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

/// Device profile used by PageSpeed Insights
#[derive(clap::ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageSpeedStrategy {
    #[default]
    Desktop,
    Mobile,
}

impl PageSpeedStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSpeedStrategy::Desktop => "desktop",
            PageSpeedStrategy::Mobile => "mobile",
        }
    }
}

/// SEOlyzer - SEO analysis tool for websites.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Either a single URL or a path to a file with URLs (one per line).
    #[arg(value_name = "URL_OR_FILE")]
    pub input: String,

    /// YAML configuration file (default: ./seolyzer.yaml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    // NETWORK
    /// Timeout for each request in seconds. [default: 10]
    #[arg(long, help_heading = "NETWORK")]
    pub timeout: Option<u64>,

    /// Maximum number of pages fetched at once (0 for unlimited). [default: 10]
    #[arg(long, help_heading = "NETWORK")]
    pub concurrency: Option<usize>,

    /// Number of retries for requests that fail before a response arrives. [default: 0]
    #[arg(long, help_heading = "NETWORK")]
    pub retry: Option<u32>,

    /// Delay between retries in milliseconds.
    #[arg(long, default_value_t = 0, help_heading = "NETWORK")]
    pub delay: u64,

    /// Limit requests per second. E.g., --rate-limit 5.
    #[arg(long, help_heading = "NETWORK")]
    pub rate_limit: Option<u64>,

    /// Random delay before each request in milliseconds. E.g., --random-delay 100:500.
    #[arg(long, help_heading = "NETWORK")]
    pub random_delay: Option<DelayRange>,

    /// Use a proxy for requests (e.g., "http://127.0.0.1:8080").
    #[arg(long, help_heading = "NETWORK")]
    pub proxy: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, help_heading = "NETWORK")]
    pub insecure: bool,

    // HTTP
    /// User-Agent header sent with every request.
    #[arg(long, help_heading = "HTTP")]
    pub user_agent: Option<String>,

    /// Custom headers to add to the request (e.g., "Accept-Language: de").
    #[arg(short = 'H', long, help_heading = "HTTP")]
    pub headers: Vec<String>,

    /// Use HTTP/2 for requests.
    #[arg(long, help_heading = "HTTP")]
    pub http2: bool,

    /// Do not follow HTTP redirects.
    #[arg(long, help_heading = "HTTP")]
    pub no_follow_redirects: bool,

    // OUTPUT
    /// Output file for the report (instead of stdout).
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Print a summary table for every analyzed page.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,

    // PAGESPEED
    /// Additionally run Google PageSpeed Insights analysis (API key required).
    #[arg(long, help_heading = "PAGESPEED")]
    pub pagespeed: bool,

    /// PageSpeed Insights API key.
    #[arg(
        long,
        env = "GOOGLE_PAGESPEED_API_KEY",
        hide_env_values = true,
        help_heading = "PAGESPEED"
    )]
    pub pagespeed_key: Option<String>,

    /// PageSpeed Insights strategy. [default: desktop]
    #[arg(long, value_enum, help_heading = "PAGESPEED")]
    pub pagespeed_strategy: Option<PageSpeedStrategy>,
}
