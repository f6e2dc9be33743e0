use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const ALLOWED_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Whether `origin` is an http(s) origin on the local machine, with or without a port.
pub fn is_local_origin(origin: &str) -> bool {
    let Some(rest) = origin.strip_prefix("http://").or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    ALLOWED_HOSTS.iter().any(|host| {
        rest == *host || rest.strip_prefix(host).is_some_and(|port| is_port_suffix(port))
    })
}

fn is_port_suffix(rest: &str) -> bool {
    rest.strip_prefix(':')
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// CORS restricted to localhost origins.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| {
            origin.to_str().is_ok_and(is_local_origin)
        }))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_loopback_origins() {
        assert!(is_local_origin("http://localhost"));
        assert!(is_local_origin("http://localhost:5173"));
        assert!(is_local_origin("https://127.0.0.1:8443"));
        assert!(is_local_origin("http://[::1]:3000"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_local_origin("http://localhost.evil.com"));
        assert!(!is_local_origin("http://localhost:80.evil.com"));
        assert!(!is_local_origin("http://example.com"));
        assert!(!is_local_origin("file://localhost"));
        assert!(!is_local_origin("null"));
    }
}
