//! Request-side token handling for sectoken.
//!
//! Provides the [`TokenSource`] trait that abstracts over whatever request
//! type your web framework uses, plus stateless functions that:
//!
//! - pull a [`Token`](sectoken_core::Token) out of a request's cookies
//!   ([`extract_from_cookies`]) or `Authorization: Bearer` header
//!   ([`extract_from_authorization_header`]);
//! - build the cookie descriptors that hand a token to the client
//!   ([`make_cookie`]) or tell it to forget one ([`remove_cookie`]).
//!
//! Nothing here holds state; every function is a pure function of its
//! input and the constants below.

mod cookie;
mod extractor;
mod request;

pub use cookie::{CookieSpec, RequestCookie, make_cookie, parse_cookie_header, remove_cookie};
pub use extractor::{extract_from_authorization_header, extract_from_cookies};
pub use request::HttpRequest;

/// Name of the cookie carrying the security token.
pub const SECURITY_TOKEN_COOKIE_NAME: &str = "app_security_token";

/// Request header carrying a bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Request header carrying the client's cookies.
pub const COOKIE_HEADER: &str = "Cookie";

/// Authorization scheme, matched case-insensitively.
pub const BEARER: &str = "bearer";

/// Shortest cookie value accepted as a token, in characters.
///
/// Counts Unicode scalar values (`str::chars`), not bytes or UTF-16 code
/// units, so a character outside the Basic Multilingual Plane counts once.
pub const MIN_COOKIE_TOKEN_LEN: usize = 10;

/// Lifetime of an issued token cookie: 30 days.
pub const COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Read access to an inbound request.
///
/// Implement this for your framework's request type (or wrap it). The
/// extractors only need two things from it.
pub trait TokenSource {
    /// Returns the request's cookies, or `None` if it carries no cookies
    /// at all.
    fn cookies(&self) -> Option<Vec<RequestCookie<'_>>>;

    /// Returns the value of the header `name` (matched case-insensitively),
    /// or `None` if the header is absent. Only the first value is used.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<S: TokenSource + ?Sized> TokenSource for &S {
    fn cookies(&self) -> Option<Vec<RequestCookie<'_>>> {
        (**self).cookies()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}
