use axum::http::{header, HeaderMap};

pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

const UNKNOWN: &str = "unknown";

fn header_str<'a>(headers: &'a HeaderMap, name: impl header::AsHeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Best-effort client identifier used as the rate limit partition key.
///
/// First match wins:
/// 1. `CF-Connecting-IP`, verbatim
/// 2. first entry of `X-Forwarded-For`
/// 3. `"{user-agent}:{accept-language}"`, each falling back to `unknown`
pub fn resolve_identifier(headers: &HeaderMap) -> String {
    if let Some(ip) = header_str(headers, CF_CONNECTING_IP) {
        return ip.to_string();
    }

    if let Some(first) = header_str(headers, X_FORWARDED_FOR)
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
    {
        return first.to_string();
    }

    let user_agent = header_str(headers, header::USER_AGENT).unwrap_or(UNKNOWN);
    let accept_language = header_str(headers, header::ACCEPT_LANGUAGE).unwrap_or(UNKNOWN);
    format!("{user_agent}:{accept_language}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let map = headers(&[
            (CF_CONNECTING_IP, "203.0.113.7"),
            (X_FORWARDED_FOR, "198.51.100.1, 10.0.0.1"),
            ("user-agent", "curl/8.0"),
        ]);
        assert_eq!(resolve_identifier(&map), "203.0.113.7");
    }

    #[test]
    fn test_first_forwarded_for_entry() {
        let map = headers(&[(X_FORWARDED_FOR, " 198.51.100.1 , 10.0.0.1")]);
        assert_eq!(resolve_identifier(&map), "198.51.100.1");
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let map = headers(&[(X_FORWARDED_FOR, " , 10.0.0.1"), ("user-agent", "curl/8.0")]);
        assert_eq!(resolve_identifier(&map), "curl/8.0:unknown");
    }

    #[test]
    fn test_user_agent_and_language_composite() {
        let map = headers(&[("user-agent", "Mozilla/5.0"), ("accept-language", "de-CH")]);
        assert_eq!(resolve_identifier(&map), "Mozilla/5.0:de-CH");
    }

    #[test]
    fn test_no_headers_at_all() {
        assert_eq!(resolve_identifier(&HeaderMap::new()), "unknown:unknown");
    }
}
