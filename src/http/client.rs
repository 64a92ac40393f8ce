use anyhow::Result;
use reqwest::{Client, ClientBuilder, redirect::Policy};

use crate::config::Settings;
use crate::constants::DEFAULT_REDIRECT_LIMIT;
use crate::http::headers::parse_headers;

/// Transport options shared by every outgoing client: user agent, TLS and proxy
pub fn base_client_builder(settings: &Settings) -> Result<ClientBuilder> {
    let mut client_builder = Client::builder().user_agent(settings.user_agent.as_str());

    if settings.insecure {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(proxy_url) = &settings.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        client_builder = client_builder.proxy(proxy);
    }

    Ok(client_builder)
}

/// Build HTTP client from the resolved settings
pub fn build_http_client(settings: &Settings) -> Result<Client> {
    let redirect_policy = if settings.follow_redirects {
        Policy::limited(DEFAULT_REDIRECT_LIMIT)
    } else {
        Policy::none()
    };

    let default_headers = parse_headers(&settings.headers);

    let mut client_builder = base_client_builder(settings)?
        .timeout(settings.timeout)
        .redirect(redirect_policy)
        .default_headers(default_headers);

    if !settings.http2 {
        client_builder = client_builder.http1_only();
    }

    Ok(client_builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use crate::types::Cli;
    use clap::Parser;

    #[test]
    fn test_build_client_with_proxy() {
        let cli = Cli::try_parse_from([
            "seolyzer",
            "https://example.com",
            "--proxy",
            "http://127.0.0.1:8080",
            "--insecure",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli, &FileConfig::default());
        assert!(build_http_client(&settings).is_ok());
    }
}
