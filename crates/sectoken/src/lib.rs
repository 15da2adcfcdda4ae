//! # sectoken
//!
//! Opaque session tokens for web backends.
//!
//! After a user signs in, sectoken mints a [`Token`], remembers which user
//! specification it stands for, and hands it to the client as a cookie.
//! On every later request it finds the token again (cookie or
//! `Authorization: Bearer` header) and resolves it back to the user.
//!
//! The pieces live in their own crates and are re-exported here:
//!
//! - `sectoken-core` — [`Token`], [`TokenError`]
//! - `sectoken-session` — [`TokenRegistry`], generators, [`TokenConfig`]
//! - `sectoken-http` — [`TokenSource`], extractors, [`CookieSpec`]
//!
//! [`SessionGate`] ties them together for the common sign-in /
//! authenticate / sign-out flow.
//!
//! ## Quick Start
//!
//! ```rust
//! use sectoken::prelude::*;
//!
//! # fn main() -> Result<(), SectokenError> {
//! let gate: SessionGate<String> = SessionGate::from_config(&TokenConfig::default())?;
//!
//! // Sign in: bind the user to a fresh token and set the cookie.
//! let signed_in = gate.sign_in("alice".to_string())?;
//! let set_cookie = signed_in.cookie.to_set_cookie_header();
//!
//! // Later request: the browser sends the cookie back.
//! let request = HttpRequest::new().with_cookie(&signed_in.cookie.name, signed_in.token.as_str());
//! assert_eq!(gate.authenticate(&request)?, "alice");
//! # let _ = set_cookie;
//! # Ok(())
//! # }
//! ```

mod error;
mod gate;
mod telemetry;

pub use error::SectokenError;
pub use gate::{SessionGate, SignIn, extract_token};
pub use telemetry::init_tracing;

pub use sectoken_core::{Token, TokenError};
pub use sectoken_http::{
    AUTHORIZATION_HEADER, COOKIE_MAX_AGE_SECS, CookieSpec, HttpRequest, RequestCookie,
    SECURITY_TOKEN_COOKIE_NAME, TokenSource, extract_from_authorization_header,
    extract_from_cookies, make_cookie, parse_cookie_header, remove_cookie,
};
pub use sectoken_session::{
    ConfigError, GeneratorKind, HmacTokenGenerator, RandomTokenGenerator, TokenConfig,
    TokenGenerator, TokenRegistry,
};

/// Everything needed for the usual sign-in flow in one `use`.
pub mod prelude {
    pub use crate::{
        CookieSpec, HttpRequest, SectokenError, SessionGate, SignIn, Token,
        TokenConfig, TokenError, TokenRegistry, TokenSource,
    };
}
