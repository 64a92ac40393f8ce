pub mod delay;
pub mod url;

pub use delay::{DelayRange, RateLimiter};
pub use url::{normalize_url_scheme, parse_target};
