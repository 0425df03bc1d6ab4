//! Request inspection helpers

use actix_web::HttpRequest;

/// Caller IP used for verification rate limiting
///
/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then `"unknown"`.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next().map(str::trim) {
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            let ip = ip_str.trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_first_hop_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.2");
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " "))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.2");
    }

    #[test]
    fn test_unknown_without_headers() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_client_ip(&req), "unknown");
    }
}
