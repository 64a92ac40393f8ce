pub mod analyzer;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod input;
pub mod logging;
pub mod output;
pub mod pagespeed;
pub mod processor;
pub mod record;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
