pub mod client;
pub mod fetch;
pub mod headers;

pub use client::{base_client_builder, build_http_client};
pub use fetch::{FetchResult, HttpFetcher, PageFetcher};
pub use headers::parse_headers;
