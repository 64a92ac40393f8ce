use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Parse "Key: Value" strings into a HeaderMap; later entries replace earlier ones
pub fn parse_headers(headers: &[String]) -> HeaderMap {
    let mut header_map = HeaderMap::new();
    for header_str in headers {
        let Some((key, value)) = header_str.split_once(':') else {
            warn!(header = %header_str, "invalid header format, expected 'Key: Value'");
            continue;
        };
        let key = key.trim();
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value.trim()),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                header_map.insert(header_name, header_value);
            }
            (Err(_), _) => warn!(name = %key, "invalid header name"),
            (_, Err(_)) => warn!(name = %key, "invalid header value"),
        }
    }
    header_map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let headers = vec![
            "Accept-Language: de".to_string(),
            "Cookie: consent=1".to_string(),
        ];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.len(), 2);
        assert_eq!(header_map.get("Accept-Language").unwrap(), "de");
        assert_eq!(header_map.get("Cookie").unwrap(), "consent=1");
    }

    #[test]
    fn test_parse_headers_override() {
        let headers = vec![
            "Accept-Language: en".to_string(),
            "Accept-Language: de".to_string(),
        ];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.len(), 1);
        assert_eq!(header_map.get("Accept-Language").unwrap(), "de");
    }

    #[test]
    fn test_parse_headers_invalid() {
        let headers = vec!["Invalid Header".to_string(), "Bad Name: x".to_string()];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.len(), 0);
    }
}
