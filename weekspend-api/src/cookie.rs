/// Session cookie encoding and extraction
///
/// The session travels in a single cookie named `session`. Its value is the
/// opaque bearer token; everything else about the session lives server-side
/// under the token's digest.
///
/// Attributes on every set: `HttpOnly; Path=/; SameSite=Lax`, plus `Secure`
/// in production. Setting carries `Expires=` in IMF-fixdate form; clearing
/// uses an empty value with `Max-Age=0`.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Builds the `Set-Cookie` value that installs or refreshes a session
pub fn set_session_cookie(token: &str, expires_at: DateTime<Utc>, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Expires={}",
        SESSION_COOKIE,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT"),
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that deletes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// True when a response already carries a `Set-Cookie` for the session
///
/// Browsers keep the last `Set-Cookie` for a name, so anything appended
/// after a handler's own session cookie would override it. The middleware
/// uses this to defer to handler mutations (sign-in set, sign-out clear).
pub fn has_session_set_cookie(headers: &HeaderMap) -> bool {
    headers.get_all(header::SET_COOKIE).iter().any(|value| {
        value
            .to_str()
            .ok()
            .and_then(|s| s.trim_start().strip_prefix(SESSION_COOKIE))
            .is_some_and(|rest| rest.starts_with('='))
    })
}

/// Extracts the session token from a request's `Cookie` headers
///
/// Returns `None` when no `session` cookie is present or its value is empty.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else { continue };
        for pair in value.split(';') {
            if let Some(rest) = pair.trim().strip_prefix(SESSION_COOKIE) {
                if let Some(token) = rest.strip_prefix('=') {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    #[test]
    fn test_set_cookie_attributes() {
        let expires = Utc.with_ymd_and_hms(2026, 9, 29, 12, 0, 0).unwrap();
        let cookie = set_session_cookie("sometoken", expires, false);

        assert!(cookie.starts_with("session=sometoken; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Expires=Tue, 29 Sep 2026 12:00:00 GMT"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_set_cookie_secure_in_production() {
        let expires = Utc.with_ymd_and_hms(2026, 9, 29, 12, 0, 0).unwrap();
        let cookie = set_session_cookie("sometoken", expires, true);
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Expires="));
    }

    #[test]
    fn test_has_session_set_cookie() {
        let mut headers = HeaderMap::new();
        assert!(!has_session_set_cookie(&headers));

        headers.append(header::SET_COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(!has_session_set_cookie(&headers));

        // Similar prefix but a different cookie name
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("sessionx=1; Path=/"),
        );
        assert!(!has_session_set_cookie(&headers));

        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("session=abc123; HttpOnly; Path=/"),
        );
        assert!(has_session_set_cookie(&headers));
    }

    #[test]
    fn test_has_session_set_cookie_counts_clears() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("session=; HttpOnly; Path=/; Max-Age=0"),
        );
        assert!(has_session_set_cookie(&headers));
    }

    #[test]
    fn test_session_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; other=1"),
        );

        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_session_token_across_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("session=xyz"));

        assert_eq!(session_token(&headers).as_deref(), Some("xyz"));
    }
}
