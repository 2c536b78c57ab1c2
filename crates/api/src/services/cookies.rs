//! Cookie helper for the admin session.
//!
//! The session token travels in a single httpOnly cookie set at login and
//! cleared at logout or when the session gate rejects a stale session.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

use crate::config::SessionConfig;

/// Builds and reads the admin session cookie.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: SessionConfig,
}

impl CookieHelper {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Session lifetime in seconds, also used as the cookie Max-Age.
    pub fn ttl_secs(&self) -> i64 {
        self.config.ttl_secs
    }

    /// Build a Set-Cookie header value carrying the session token.
    pub fn build_session_cookie(&self, token: &str) -> String {
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}",
            self.config.cookie_name,
            token,
            self.ttl_secs()
        );
        self.with_attributes(cookie)
    }

    /// Build a Set-Cookie header value that clears the session cookie.
    pub fn build_clear_cookie(&self) -> String {
        let cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.config.cookie_name
        );
        self.with_attributes(cookie)
    }

    /// Append the session cookie to a HeaderMap.
    pub fn add_session_cookie(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(token)) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Append a clearing cookie to a HeaderMap.
    pub fn add_clear_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear_cookie()) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Extract a cookie value from request headers by name.
    pub fn extract_cookie<'a>(&self, headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|cookie_header| cookie_header.split(';'))
            .map(|s| s.trim())
            .find_map(|cookie| {
                let (cookie_name, cookie_value) = cookie.split_once('=')?;
                (cookie_name == name).then_some(cookie_value)
            })
    }

    /// The session token from the request, if a non-empty one is present.
    pub fn extract_session_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.extract_cookie(headers, &self.config.cookie_name)
            .filter(|token| !token.is_empty())
    }

    fn with_attributes(&self, mut cookie: String) -> String {
        cookie.push_str("; HttpOnly");

        if self.config.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.config.same_site));

        if let Some(domain) = self.config.domain.as_deref().filter(|d| !d.is_empty()) {
            cookie.push_str(&format!("; Domain={}", domain));
        }

        cookie
    }
}
