//! A plain in-memory request, for tests, demos, and adapters that copy
//! headers out of a framework request.

use crate::cookie::{RequestCookie, parse_cookie_header};
use crate::{COOKIE_HEADER, TokenSource};

/// An owned request: a list of headers plus optional explicit cookies.
///
/// Cookies come from two places, explicit pairs added with
/// [`HttpRequest::with_cookie`] followed by whatever the `Cookie` header
/// holds. A request with neither has no cookies at all.
///
/// ```rust
/// use sectoken_http::{HttpRequest, extract_from_cookies};
///
/// let request = HttpRequest::new()
///     .with_header("Cookie", "theme=dark; app_security_token=abcdefghij");
///
/// let token = extract_from_cookies(&request).unwrap();
/// assert_eq!(token.as_str(), "abcdefghij");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    headers: Vec<(String, String)>,
    cookies: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header. Repeated names are kept; lookups return the first.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a cookie directly, bypassing the `Cookie` header.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }
}

impl TokenSource for HttpRequest {
    fn cookies(&self) -> Option<Vec<RequestCookie<'_>>> {
        let explicit = self.cookies.as_ref().map(|cookies| {
            cookies
                .iter()
                .map(|(name, value)| RequestCookie::new(name, value))
                .collect::<Vec<_>>()
        });
        let from_header = self.header(COOKIE_HEADER).map(parse_cookie_header);

        match (explicit, from_header) {
            (None, None) => None,
            (Some(cookies), None) | (None, Some(cookies)) => Some(cookies),
            (Some(mut cookies), Some(parsed)) => {
                cookies.extend(parsed);
                Some(cookies)
            }
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_has_no_cookies() {
        assert!(HttpRequest::new().cookies().is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::new().with_header("authorization", "Bearer x");

        assert_eq!(req.header("Authorization"), Some("Bearer x"));
        assert_eq!(req.header("AUTHORIZATION"), Some("Bearer x"));
        assert_eq!(req.header("Accept"), None);
    }

    #[test]
    fn test_header_first_value_wins() {
        let req = HttpRequest::new()
            .with_header("X-Test", "one")
            .with_header("x-test", "two");

        assert_eq!(req.header("x-test"), Some("one"));
    }

    #[test]
    fn test_cookies_from_cookie_header() {
        let req = HttpRequest::new().with_header("cookie", "a=1; b=2");

        assert_eq!(
            req.cookies().unwrap(),
            vec![RequestCookie::new("a", "1"), RequestCookie::new("b", "2")]
        );
    }

    #[test]
    fn test_cookies_explicit_before_header() {
        let req = HttpRequest::new()
            .with_header("Cookie", "b=2")
            .with_cookie("a", "1");

        assert_eq!(
            req.cookies().unwrap(),
            vec![RequestCookie::new("a", "1"), RequestCookie::new("b", "2")]
        );
    }

    #[test]
    fn test_empty_cookie_header_yields_empty_list() {
        let req = HttpRequest::new().with_header("Cookie", "");
        assert_eq!(req.cookies(), Some(vec![]));
    }
}
