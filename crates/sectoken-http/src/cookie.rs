//! Cookies in both directions: parsing what the client sent, and
//! describing what the server should send back.

use std::fmt;

use sectoken_core::Token;
use serde::{Deserialize, Serialize};

use crate::{COOKIE_MAX_AGE_SECS, SECURITY_TOKEN_COOKIE_NAME};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A single name/value pair from a request's `Cookie` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCookie<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> RequestCookie<'a> {
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }
}

/// Splits a `Cookie` request header (`a=1; b=2`) into pairs.
///
/// Names and values are trimmed, and a value wrapped in double quotes is
/// unwrapped. Fragments without `=` or with an empty name are skipped.
pub fn parse_cookie_header(header: &str) -> Vec<RequestCookie<'_>> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some(RequestCookie::new(name, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// A cookie the caller should attach to its response.
///
/// Rendered as a `Set-Cookie` header value by
/// [`CookieSpec::to_set_cookie_header`] (or `Display`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    /// Only send over HTTPS.
    pub secure: bool,
    pub path: String,
    /// Seconds until the client discards the cookie. 0 deletes it now.
    pub max_age: u64,
}

impl CookieSpec {
    /// Renders the cookie as a `Set-Cookie` header value, e.g.
    /// `app_security_token=abc; Path=/; Max-Age=2592000; Secure`.
    pub fn to_set_cookie_header(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CookieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, self.path, self.max_age
        )?;
        if self.secure {
            f.write_str("; Secure")?;
        }
        Ok(())
    }
}

/// Builds the cookie that hands `token` to the client after sign-in.
///
/// Secure, path `/`, valid for 30 days.
pub fn make_cookie(token: &Token) -> CookieSpec {
    CookieSpec {
        name: SECURITY_TOKEN_COOKIE_NAME.to_string(),
        value: token.as_str().to_string(),
        secure: true,
        path: "/".to_string(),
        max_age: COOKIE_MAX_AGE_SECS,
    }
}

/// Builds the cookie that makes the client drop `token` on sign-out.
///
/// Identical to [`make_cookie`] except that it expires immediately.
pub fn remove_cookie(token: &Token) -> CookieSpec {
    CookieSpec {
        max_age: 0,
        ..make_cookie(token)
    }
}
