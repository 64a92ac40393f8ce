use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_CONFIG_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error::ConfigError;
use crate::types::{Cli, PageSpeedStrategy};
use crate::utils::DelayRange;

/// Contents of the optional YAML configuration file.
///
/// ```yaml
/// http:
///   user_agent: "Mozilla/5.0 (compatible; SEOlyzer)"
///   timeout: 15
///   concurrency: 8
///   headers:
///     - "Accept-Language: en"
/// pagespeed:
///   strategy: mobile
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub http: HttpConfig,
    pub pagespeed: PageSpeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    pub timeout: Option<u64>,
    pub concurrency: Option<usize>,
    pub retry: Option<u32>,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSpeedConfig {
    pub strategy: Option<PageSpeedStrategy>,
}

impl FileConfig {
    /// Load the file named by --config, or `seolyzer.yaml` from the working
    /// directory when it exists. An explicit path that is missing is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSpeedSettings {
    pub api_key: Option<String>,
    pub strategy: PageSpeedStrategy,
}

/// Effective run settings: CLI flags, then the config file, then defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub timeout: Duration,
    pub concurrency: usize,
    pub retry: u32,
    pub retry_delay: Duration,
    pub rate_limit: Option<u64>,
    pub random_delay: Option<DelayRange>,
    pub proxy: Option<String>,
    pub insecure: bool,
    pub user_agent: String,
    pub headers: Vec<String>,
    pub http2: bool,
    pub follow_redirects: bool,
    pub pagespeed: Option<PageSpeedSettings>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: &FileConfig) -> Self {
        // File headers first so that CLI headers with the same name win.
        let mut headers = file.http.headers.clone();
        headers.extend(cli.headers.iter().cloned());

        let pagespeed = cli.pagespeed.then(|| PageSpeedSettings {
            api_key: cli.pagespeed_key.clone().filter(|key| !key.trim().is_empty()),
            strategy: cli
                .pagespeed_strategy
                .or(file.pagespeed.strategy)
                .unwrap_or_default(),
        });

        Settings {
            timeout: Duration::from_secs(
                cli.timeout
                    .or(file.http.timeout)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            concurrency: cli
                .concurrency
                .or(file.http.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY),
            retry: cli.retry.or(file.http.retry).unwrap_or(0),
            retry_delay: Duration::from_millis(cli.delay),
            rate_limit: cli.rate_limit,
            random_delay: cli.random_delay,
            proxy: cli.proxy.clone(),
            insecure: cli.insecure,
            user_agent: cli
                .user_agent
                .clone()
                .or_else(|| file.http.user_agent.clone())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            headers,
            http2: cli.http2,
            follow_redirects: !cli.no_follow_redirects,
            pagespeed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["seolyzer", "https://example.com"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(&cli(&[]), &FileConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(settings.retry, 0);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
        assert!(settings.follow_redirects);
        assert!(settings.pagespeed.is_none());
    }

    #[test]
    fn test_load_and_merge_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "http:\n  user_agent: TestBot/1.0\n  timeout: 30\n  concurrency: 2\n  headers:\n    - \"Accept-Language: en\"\npagespeed:\n  strategy: mobile"
        )
        .unwrap();

        let config = FileConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.http.user_agent.as_deref(), Some("TestBot/1.0"));
        assert_eq!(config.pagespeed.strategy, Some(PageSpeedStrategy::Mobile));

        let settings = Settings::resolve(
            &cli(&["--timeout", "5", "-H", "Accept-Language: de", "--pagespeed"]),
            &config,
        );
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.concurrency, 2);
        assert_eq!(settings.user_agent, "TestBot/1.0");
        assert_eq!(
            settings.headers,
            vec!["Accept-Language: en".to_string(), "Accept-Language: de".to_string()]
        );
        let pagespeed = settings.pagespeed.unwrap();
        assert_eq!(pagespeed.strategy, PageSpeedStrategy::Mobile);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = FileConfig::load(Some(Path::new("/nonexistent/seolyzer.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  unknown_key: 1").unwrap();
        let err = FileConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(FileConfig::load_from(file.path()).unwrap(), FileConfig::default());
    }
}
