/// HTTP constants
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("SEOlyzer/", env!("CARGO_PKG_VERSION"));

/// Content types accepted as HTML documents
pub const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// Config file looked up in the working directory when --config is not given
pub const DEFAULT_CONFIG_FILE: &str = "seolyzer.yaml";

/// Time conversion constants
pub const MICROSECONDS_PER_SECOND: u64 = 1_000_000;

/// Google PageSpeed Insights
pub const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Report columns, in output order
pub const REPORT_COLUMNS: [&str; 14] = [
    "URL",
    "Title",
    "Description",
    "H1 Count",
    "H1 Content",
    "H2 Count",
    "H2 Content",
    "Image Count",
    "Load Time",
    "Size",
    "Viewport",
    "Canonical",
    "hreflang",
    "Noindex",
];
pub const PAGESPEED_COLUMNS: [&str; 4] = ["PageSpeed Score", "LCP", "CLS", "FID"];
pub const ERROR_COLUMN: &str = "Error";
