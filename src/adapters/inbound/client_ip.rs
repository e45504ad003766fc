//! Client IP extraction
//!
//! Best-effort attribution of the originating visitor address from proxy
//! headers. Headers are spoofable; the result is for display only.

use crate::domain::entities::ClientAddress;
use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Cloudflare's connecting-client header.
pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Trimmed, non-empty header value.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Extract client IP from request headers or the connection.
///
/// Precedence: `CF-Connecting-IP`, first entry of `X-Forwarded-For`,
/// `X-Real-IP`, then the socket address. Values are not checked for IP
/// syntax.
pub fn extract_client_ip(
    headers: &HeaderMap,
    remote_addr: Option<SocketAddr>,
) -> Option<ClientAddress> {
    if let Some(ip) = header_value(headers, CF_CONNECTING_IP) {
        return Some(ClientAddress::new(ip));
    }

    // X-Forwarded-For: client, proxy1, proxy2
    if let Some(first) = header_value(headers, X_FORWARDED_FOR)
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        // An empty first hop falls through to X-Real-IP instead of yielding ""
        .filter(|ip| !ip.is_empty())
    {
        return Some(ClientAddress::new(first));
    }

    if let Some(ip) = header_value(headers, X_REAL_IP) {
        return Some(ClientAddress::new(ip));
    }

    remote_addr.map(|addr| ClientAddress::new(addr.ip().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn remote() -> Option<SocketAddr> {
        Some("198.51.100.20:54321".parse().unwrap())
    }

    fn ip(s: &str) -> Option<ClientAddress> {
        Some(ClientAddress::new(s))
    }

    #[test]
    fn test_no_headers_uses_remote_addr() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), remote()), ip("198.51.100.20"));
    }

    #[test]
    fn test_no_headers_ipv6_remote() {
        let remote = Some("[2001:db8::1]:443".parse().unwrap());
        assert_eq!(extract_client_ip(&HeaderMap::new(), remote), ip("2001:db8::1"));
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let h = headers(&[(X_FORWARDED_FOR, "8.8.8.8, 10.0.0.1")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("8.8.8.8"));

        let h = headers(&[(X_FORWARDED_FOR, "  203.0.113.9  ,10.0.0.1, 10.0.0.2")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("203.0.113.9"));
    }

    #[test]
    fn test_forwarded_for_single_entry() {
        let h = headers(&[(X_FORWARDED_FOR, "203.0.113.5")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("203.0.113.5"));
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let h = headers(&[
            (CF_CONNECTING_IP, "1.2.3.4"),
            (X_FORWARDED_FOR, "8.8.8.8"),
            (X_REAL_IP, "9.9.9.9"),
        ]);
        assert_eq!(extract_client_ip(&h, remote()), ip("1.2.3.4"));
    }

    #[test]
    fn test_forwarded_for_beats_real_ip() {
        let h = headers(&[(X_FORWARDED_FOR, "8.8.8.8"), (X_REAL_IP, "9.9.9.9")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("8.8.8.8"));
    }

    #[test]
    fn test_real_ip_trimmed() {
        let h = headers(&[(X_REAL_IP, "  9.9.9.9 ")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("9.9.9.9"));
    }

    #[test]
    fn test_empty_headers_fall_through() {
        let h = headers(&[(CF_CONNECTING_IP, "  "), (X_FORWARDED_FOR, " , 10.0.0.1")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("198.51.100.20"));
    }

    #[test]
    fn test_empty_first_forwarded_entry_uses_real_ip() {
        let h = headers(&[(X_FORWARDED_FOR, " , 10.0.0.1"), (X_REAL_IP, "9.9.9.9")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("9.9.9.9"));
    }

    #[test]
    fn test_values_are_not_validated() {
        let h = headers(&[(X_REAL_IP, "unknown")]);
        assert_eq!(extract_client_ip(&h, remote()), ip("unknown"));
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let mut h = HeaderMap::new();
        h.insert(
            HeaderName::from_bytes(b"X-Forwarded-For").unwrap(),
            HeaderValue::from_static("8.8.4.4"),
        );
        assert_eq!(extract_client_ip(&h, remote()), ip("8.8.4.4"));
    }
}
