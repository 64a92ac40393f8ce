use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the command-line input, raised before any request is sent
#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{0}' is neither an existing file nor a valid URL")]
    InvalidInput(String),

    #[error("failed to read URL list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid URLs found in {}", .0.display())]
    NoUrls(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Why a single page could not be analyzed. Recorded on the report row, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("analysis task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid delay range '{0}', expected MIN:MAX in milliseconds with MIN <= MAX")]
pub struct DelayRangeError(pub String);
