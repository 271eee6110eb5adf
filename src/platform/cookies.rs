//! Netscape cookie file loading
//!
//! The Netscape format is the tab-separated layout written by browser
//! exporters and tools like yt-dlp:
//!
//! ```text
//! domain<TAB>flag<TAB>path<TAB>secure<TAB>expiration<TAB>name<TAB>value
//! ```
//!
//! Lines starting with `#` and blank lines are comments.

use crate::error::YtdlError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds in roughly one hundred years, used for session cookies.
const FAR_FUTURE_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// An HTTP cookie read from a Netscape cookie file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: SystemTime,
    pub secure: bool,
    pub http_only: bool,
}

/// Load cookies from a Netscape format cookie file.
///
/// Session cookies (expiration `0`) are materialized with a far-future
/// expiry so they survive the whole process lifetime.
pub fn load_cookies_from_file(path: &Path) -> Result<Vec<Cookie>, YtdlError> {
    let file = File::open(path).map_err(YtdlError::CookieOpen)?;
    let reader = BufReader::new(file);

    let mut cookies = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(YtdlError::CookieIo)?;
        let line_num = idx + 1;

        if let Some(cookie) = parse_cookie_line(&line, line_num)? {
            cookies.push(cookie);
        }
    }

    Ok(cookies)
}

/// Parse a single line of a Netscape cookie file.
///
/// Returns `Ok(None)` for comment and blank lines.
fn parse_cookie_line(line: &str, line_num: usize) -> Result<Option<Cookie>, YtdlError> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 7 {
        return Err(YtdlError::CookieLineMalformed {
            line: line_num,
            reason: format!("expected 7 fields, got {}", parts.len()),
        });
    }

    let expiration = parts[4].trim();
    let expires = if expiration == "0" {
        SystemTime::now() + Duration::from_secs(FAR_FUTURE_SECS)
    } else {
        let secs: i64 = expiration
            .parse()
            .map_err(|_| YtdlError::CookieLineMalformed {
                line: line_num,
                reason: format!("parsing expiration time {:?}", expiration),
            })?;
        // Pre-epoch expirations are already stale; clamp to the epoch.
        UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
    };

    let secure = parts[3].trim().eq_ignore_ascii_case("TRUE");

    Ok(Some(Cookie {
        domain: parts[0].trim().to_string(),
        path: parts[2].trim().to_string(),
        secure,
        expires,
        name: parts[5].trim().to_string(),
        value: parts[6].trim().to_string(),
        http_only: false,
    }))
}

/// Filter cookies to only those marked secure.
///
/// YouTube authentication cookies are typically `__Secure-` prefixed and
/// carry the secure flag.
pub fn filter_secure_cookies(cookies: &[Cookie]) -> Vec<&Cookie> {
    cookies.iter().filter(|c| c.secure).collect()
}

/// Check whether the cookies contain an unexpired YouTube authentication
/// cookie (`__Secure-` prefix).
pub fn is_authenticated(cookies: &[Cookie]) -> bool {
    let now = SystemTime::now();
    let mut has_secure_cookie = false;

    for cookie in cookies {
        if cookie.name.starts_with("__Secure-") {
            has_secure_cookie = true;
            if cookie.expires < now {
                return false;
            }
        }
    }

    has_secure_cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_cookie_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_cookies_basic() {
        let file = write_cookie_file(
            "# Netscape HTTP Cookie File\n\
             # This is a comment\n\
             \n\
             .youtube.com\tTRUE\t/\tTRUE\t1735689600\t__Secure-1PSID\tsecret_value\n\
             .youtube.com\tTRUE\t/\tFALSE\t1735689600\tPREF\thl=en\n\
             .youtube.com\tTRUE\t/\tTRUE\t0\tSESSION\tsession_value\n",
        );

        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert_eq!(cookies.len(), 3);

        assert_eq!(cookies[0].name, "__Secure-1PSID");
        assert_eq!(cookies[0].value, "secret_value");
        assert_eq!(cookies[0].domain, ".youtube.com");
        assert_eq!(cookies[0].path, "/");
        assert!(cookies[0].secure);

        assert_eq!(cookies[1].name, "PREF");
        assert!(!cookies[1].secure);
    }

    #[test]
    fn test_session_cookie_far_future() {
        let file = write_cookie_file(".youtube.com\tTRUE\t/\tTRUE\t0\tSESSION\tvalue\n");

        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert_eq!(cookies.len(), 1);

        // Session cookies must expire at least 99 years from now.
        let min_expiry = SystemTime::now() + Duration::from_secs(99 * 365 * 24 * 60 * 60);
        assert!(cookies[0].expires >= min_expiry);
    }

    #[test]
    fn test_explicit_expiration() {
        let file = write_cookie_file(".youtube.com\tTRUE\t/\tFALSE\t1735689600\tNAME\tvalue\n");

        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert_eq!(
            cookies[0].expires,
            UNIX_EPOCH + Duration::from_secs(1735689600)
        );
    }

    #[test]
    fn test_secure_flag_case_insensitive() {
        let file = write_cookie_file(
            ".youtube.com\tTRUE\t/\ttrue\t0\tA\t1\n\
             .youtube.com\tTRUE\t/\tTrue\t0\tB\t2\n\
             .youtube.com\tTRUE\t/\tfalse\t0\tC\t3\n",
        );

        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert!(cookies[0].secure);
        assert!(cookies[1].secure);
        assert!(!cookies[2].secure);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let file = write_cookie_file(
            "# header\n\
             .youtube.com\tTRUE\t/\tTRUE\t0\tOK\tvalue\n\
             this line has no tabs\n",
        );

        let err = load_cookies_from_file(file.path()).unwrap_err();
        match err {
            YtdlError::CookieLineMalformed { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 7 fields"));
            }
            other => panic!("expected CookieLineMalformed, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_expiration_is_malformed() {
        let file = write_cookie_file(".youtube.com\tTRUE\t/\tTRUE\tnotanumber\tNAME\tvalue\n");

        let err = load_cookies_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            YtdlError::CookieLineMalformed { line: 1, .. }
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = load_cookies_from_file(Path::new("/nonexistent/cookies.txt")).unwrap_err();
        assert!(matches!(err, YtdlError::CookieOpen(_)));
    }

    #[test]
    fn test_empty_file() {
        let file = write_cookie_file("");
        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert!(cookies.is_empty());
    }

    #[test]
    fn test_filter_secure_cookies() {
        let file = write_cookie_file(
            ".youtube.com\tTRUE\t/\tTRUE\t0\t__Secure-1PSID\ta\n\
             .youtube.com\tTRUE\t/\tFALSE\t0\tPREF\tb\n",
        );

        let cookies = load_cookies_from_file(file.path()).unwrap();
        let secure = filter_secure_cookies(&cookies);
        assert_eq!(secure.len(), 1);
        assert_eq!(secure[0].name, "__Secure-1PSID");
    }

    #[test]
    fn test_is_authenticated() {
        let file = write_cookie_file(
            ".youtube.com\tTRUE\t/\tTRUE\t0\t__Secure-1PSID\ta\n\
             .youtube.com\tTRUE\t/\tFALSE\t0\tPREF\tb\n",
        );
        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert!(is_authenticated(&cookies));

        // Expired auth cookie
        let file = write_cookie_file(".youtube.com\tTRUE\t/\tTRUE\t1000\t__Secure-1PSID\ta\n");
        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert!(!is_authenticated(&cookies));

        // No auth cookie at all
        let file = write_cookie_file(".youtube.com\tTRUE\t/\tFALSE\t0\tPREF\tb\n");
        let cookies = load_cookies_from_file(file.path()).unwrap();
        assert!(!is_authenticated(&cookies));
    }
}
