//! Shared HTTP transport for YouTube requests
//!
//! One `reqwest::Client` is built lazily per process and shared by every
//! component; it is never reconfigured after construction. Components take
//! a `Client` handle so tests can inject their own.

use crate::error::YtdlError;
use crate::platform::cookies::Cookie;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// The User-Agent string sent with every request.
pub fn user_agent() -> String {
    format!("ytdl/{}", env!("CARGO_PKG_VERSION"))
}

fn base_builder(timeout: Duration) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Client::builder()
        .user_agent(user_agent())
        .default_headers(headers)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
}

/// Get the shared process-wide HTTP client.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        base_builder(DEFAULT_TIMEOUT)
            .build()
            .expect("default HTTP client configuration is valid")
    })
}

/// Build a dedicated HTTP client with a custom request timeout and a
/// cookie jar seeded from the given cookies.
///
/// Used when the operator passes `--cookies` or `--timeout`; the shared
/// client stays at the defaults.
pub fn build_client(cookies: &[Cookie], timeout: Duration) -> Result<Client, YtdlError> {
    let jar = reqwest::cookie::Jar::default();

    for cookie in cookies {
        let domain = cookie.domain.trim_start_matches('.');
        let url: url::Url = format!("https://{}/", domain).parse()?;

        let mut parts = format!(
            "{}={}; Domain={}; Path={}",
            cookie.name, cookie.value, cookie.domain, cookie.path
        );
        if let Ok(remaining) = cookie.expires.duration_since(SystemTime::now()) {
            parts.push_str(&format!("; Max-Age={}", remaining.as_secs()));
        }
        if cookie.secure {
            parts.push_str("; Secure");
        }
        if cookie.http_only {
            parts.push_str("; HttpOnly");
        }

        jar.add_cookie_str(&parts, &url);
    }

    let client = base_builder(timeout)
        .cookie_provider(std::sync::Arc::new(jar))
        .build()?;

    Ok(client)
}

/// Build a dedicated HTTP client whose cookie jar is seeded from the given
/// cookies, with the default timeout.
pub fn client_with_cookies(cookies: &[Cookie]) -> Result<Client, YtdlError> {
    build_client(cookies, DEFAULT_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("ytdl/"));
        assert!(ua.len() > "ytdl/".len());
    }

    #[test]
    fn test_shared_client_is_singleton() {
        let a = shared_client() as *const Client;
        let b = shared_client() as *const Client;
        assert_eq!(a, b);
    }

    #[test]
    fn test_client_with_cookies() {
        let cookies = vec![
            Cookie {
                name: "__Secure-1PSID".to_string(),
                value: "secret".to_string(),
                domain: ".youtube.com".to_string(),
                path: "/".to_string(),
                expires: SystemTime::now() + Duration::from_secs(3600),
                secure: true,
                http_only: false,
            },
            Cookie {
                name: "PREF".to_string(),
                value: "hl=en".to_string(),
                domain: ".youtube.com".to_string(),
                path: "/".to_string(),
                // Already expired; the jar simply drops it.
                expires: UNIX_EPOCH + Duration::from_secs(1000),
                secure: false,
                http_only: false,
            },
        ];

        assert!(client_with_cookies(&cookies).is_ok());
    }

    #[test]
    fn test_client_with_no_cookies() {
        assert!(client_with_cookies(&[]).is_ok());
    }
}
