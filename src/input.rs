use std::fmt;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use crate::error::InputError;
use crate::utils::url::has_http_scheme;
use crate::utils::{normalize_url_scheme, parse_target};

/// One URL to analyze, keeping the entry as the user wrote it for the report
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Trimmed input entry, with a scheme prefixed when it had none
    pub input: String,
    pub url: Url,
}

impl Target {
    pub fn parse(raw: &str) -> Option<Self> {
        let url = parse_target(raw)?;
        Some(Target {
            input: normalize_url_scheme(raw),
            url,
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}

/// Resolve the command-line argument into the ordered list of URLs to analyze.
///
/// An existing file is read as one URL per line; anything else must itself be
/// an `http://` or `https://` URL. Bare domains are only accepted inside a
/// file, so a mistyped file name is never fetched as a host.
pub async fn resolve_input(arg: &str) -> Result<Vec<Target>, InputError> {
    let path = Path::new(arg);
    if path.is_file() {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let targets = parse_url_list(&contents);
        if targets.is_empty() {
            return Err(InputError::NoUrls(path.to_path_buf()));
        }
        debug!(file = %path.display(), count = targets.len(), "read URL list");
        return Ok(targets);
    }

    let trimmed = arg.trim();
    if !has_http_scheme(trimmed) {
        return Err(InputError::InvalidInput(arg.to_string()));
    }
    Target::parse(trimmed)
        .map(|target| vec![target])
        .ok_or_else(|| InputError::InvalidInput(arg.to_string()))
}

/// Parse a newline-delimited URL list. Blank lines and `#` comments are
/// ignored, invalid entries are skipped with a warning.
pub fn parse_url_list(contents: &str) -> Vec<Target> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let target = Target::parse(line);
            if target.is_none() {
                warn!(line = index + 1, entry = line, "skipping invalid URL");
            }
            target
        })
        .collect()
}
