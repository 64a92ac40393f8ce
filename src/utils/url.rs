use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}$")
        .expect("domain pattern is a valid regex")
});

/// Normalize URL by adding the appropriate scheme if missing
pub fn normalize_url_scheme(url_str: &str) -> String {
    let trimmed_url = url_str.trim();
    if has_http_scheme(trimmed_url) {
        return trimmed_url.to_string();
    }

    if let Some(port_str) = port_of(host_and_port(trimmed_url))
        && port_str == "80"
    {
        return format!("http://{}", trimmed_url);
    }

    // For 443, any other port or no port at all, use https.
    format!("https://{}", trimmed_url)
}

pub fn has_http_scheme(url_str: &str) -> bool {
    let starts_with = |prefix: &str| {
        url_str
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// Check that a bare host looks like a public domain name (e.g. "www.example.com")
pub fn is_plausible_domain(host: &str) -> bool {
    DOMAIN_PATTERN.is_match(host)
}

/// Parse a user-supplied target into an http(s) URL.
///
/// Entries with an explicit scheme only need to parse and carry a host.
/// Entries without one must start with a plausible domain and get a scheme
/// through [`normalize_url_scheme`].
pub fn parse_target(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        let authority = host_and_port(trimmed);
        let host = match port_of(authority) {
            Some(port) => &authority[..authority.len() - port.len() - 1],
            None => authority,
        };
        if !is_plausible_domain(host) {
            return None;
        }
        normalize_url_scheme(trimmed)
    };

    let url = Url::parse(&candidate).ok()?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    (matches!(url.scheme(), "http" | "https") && has_host).then_some(url)
}

fn host_and_port(url_str: &str) -> &str {
    url_str
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(url_str)
}

fn port_of(authority: &str) -> Option<&str> {
    let (_, port) = authority.rsplit_once(':')?;
    // Ensure what follows ':' is a valid port number
    (!port.is_empty() && port.chars().all(|c| c.is_ascii_digit())).then_some(port)
}
