//! `SessionGate`: the sign-in / authenticate / sign-out flow.
//!
//! Ties the layers together: the registry (who owns which token) and the
//! HTTP helpers (where the token travels).
//!
//! ```text
//! sign_in(spec)      → registry.create_new → make_cookie
//! authenticate(req)  → extract (cookie, then header) → registry.get_user
//! sign_out(req)      → extract → registry.remove → remove_cookie
//! ```

use std::fmt;

use sectoken_core::{Token, TokenError};
use sectoken_http::{
    CookieSpec, TokenSource, extract_from_authorization_header, extract_from_cookies, make_cookie,
    remove_cookie,
};
use sectoken_session::{TokenConfig, TokenGenerator, TokenRegistry};

use crate::SectokenError;

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    /// The freshly minted token.
    pub token: Token,
    /// The cookie to attach to the response.
    pub cookie: CookieSpec,
}

/// Front door for session handling, generic over the user specification
/// `T` stored per token.
///
/// Share one gate across request handlers by wrapping it in an `Arc`; the
/// underlying registry needs no further locking.
pub struct SessionGate<T, G = Box<dyn TokenGenerator>> {
    registry: TokenRegistry<T, G>,
}

impl<T, G> fmt::Debug for SessionGate<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("registry", &self.registry)
            .finish()
    }
}

impl<T> SessionGate<T> {
    /// Creates a gate backed by a fresh registry built from `config`.
    ///
    /// # Errors
    /// [`SectokenError::Config`] if the config is unusable.
    pub fn from_config(config: &TokenConfig) -> Result<Self, SectokenError> {
        Ok(Self::new(TokenRegistry::from_config(config)?))
    }
}

impl<T, G: TokenGenerator> SessionGate<T, G> {
    /// Wraps an existing registry.
    pub fn new(registry: TokenRegistry<T, G>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &TokenRegistry<T, G> {
        &self.registry
    }

    /// Binds `spec` to a new token and builds the cookie carrying it.
    ///
    /// # Errors
    /// [`TokenError::GenerationFailure`] if no token could be minted.
    pub fn sign_in(&self, spec: T) -> Result<SignIn, TokenError> {
        let token = self.registry.create_new(spec)?;
        let cookie = make_cookie(&token);
        Ok(SignIn { token, cookie })
    }

    /// Resolves the request to the signed-in user's specification.
    ///
    /// # Errors
    /// Any extraction error, or [`TokenError::UnknownToken`] if the token
    /// is not (or no longer) registered.
    pub fn authenticate<R>(&self, request: &R) -> Result<T, TokenError>
    where
        R: TokenSource + ?Sized,
        T: Clone,
    {
        let token = extract_token(request)?;
        self.registry.get_user(&token)
    }

    /// Signs the request's user out and builds the cookie that clears the
    /// token on the client.
    ///
    /// Signing out with a token that is already gone still succeeds.
    ///
    /// # Errors
    /// Any extraction error: without a token there is nothing to clear.
    pub fn sign_out<R>(&self, request: &R) -> Result<CookieSpec, TokenError>
    where
        R: TokenSource + ?Sized,
    {
        let token = extract_token(request)?;
        self.registry.remove_security_token(&token);
        Ok(remove_cookie(&token))
    }
}

/// Finds the request's token: the security cookie if there is one,
/// otherwise the `Authorization: Bearer` header.
///
/// Only a *missing* cookie falls through to the header. A cookie that
/// is present but malformed fails straight away.
///
/// # Errors
/// - [`TokenError::MissingToken`] — neither source carries a token
/// - [`TokenError::InvalidTokenValue`] — the chosen source is malformed
pub fn extract_token<R>(request: &R) -> Result<Token, TokenError>
where
    R: TokenSource + ?Sized,
{
    match extract_from_cookies(request) {
        Err(TokenError::MissingToken(_)) => {
            tracing::debug!("no token cookie, trying authorization header");
            extract_from_authorization_header(request)
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use sectoken_http::{HttpRequest, SECURITY_TOKEN_COOKIE_NAME};
    use sectoken_session::RandomTokenGenerator;

    use super::*;

    fn gate() -> SessionGate<String, RandomTokenGenerator> {
        SessionGate::new(TokenRegistry::new(RandomTokenGenerator))
    }

    fn cookie_request(token: &Token) -> HttpRequest {
        HttpRequest::new().with_cookie(SECURITY_TOKEN_COOKIE_NAME, token.as_str())
    }

    #[test]
    fn test_sign_in_returns_matching_cookie() {
        let gate = gate();

        let signed_in = gate.sign_in("alice".into()).unwrap();

        assert_eq!(signed_in.cookie, make_cookie(&signed_in.token));
        assert!(gate.registry().exists(&signed_in.token));
    }

    #[test]
    fn test_authenticate_with_cookie() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();

        let user = gate.authenticate(&cookie_request(&signed_in.token)).unwrap();

        assert_eq!(user, "alice");
    }

    #[test]
    fn test_authenticate_falls_back_to_bearer_header() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();
        let req = HttpRequest::new().with_header(
            "Authorization",
            format!("Bearer {}", signed_in.token),
        );

        assert_eq!(gate.authenticate(&req).unwrap(), "alice");
    }

    #[test]
    fn test_authenticate_falls_back_when_cookies_lack_token() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();
        let req = HttpRequest::new()
            .with_header("Cookie", "theme=dark")
            .with_header("Authorization", format!("bearer {}", signed_in.token));

        assert_eq!(gate.authenticate(&req).unwrap(), "alice");
    }

    #[test]
    fn test_authenticate_malformed_cookie_does_not_fall_back() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();
        let req = HttpRequest::new()
            .with_cookie(SECURITY_TOKEN_COOKIE_NAME, "short")
            .with_header("Authorization", format!("Bearer {}", signed_in.token));

        assert!(matches!(
            gate.authenticate(&req),
            Err(TokenError::InvalidTokenValue(_))
        ));
    }

    #[test]
    fn test_authenticate_no_token_anywhere_returns_missing() {
        let gate = gate();

        assert!(matches!(
            gate.authenticate(&HttpRequest::new()),
            Err(TokenError::MissingToken(_))
        ));
    }

    #[test]
    fn test_authenticate_unregistered_token_returns_unknown() {
        let gate = gate();
        let stranger = Token::new("not-issued-by-this-server").unwrap();

        assert!(matches!(
            gate.authenticate(&cookie_request(&stranger)),
            Err(TokenError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_sign_out_removes_token_and_returns_removal_cookie() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();
        let req = cookie_request(&signed_in.token);

        let cookie = gate.sign_out(&req).unwrap();

        assert_eq!(cookie, remove_cookie(&signed_in.token));
        assert!(!gate.registry().exists(&signed_in.token));
        assert!(matches!(
            gate.authenticate(&req),
            Err(TokenError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_sign_out_twice_succeeds() {
        let gate = gate();
        let signed_in = gate.sign_in("alice".into()).unwrap();
        let req = cookie_request(&signed_in.token);

        gate.sign_out(&req).unwrap();

        assert!(gate.sign_out(&req).is_ok());
    }

    #[test]
    fn test_sign_out_without_token_returns_missing() {
        let gate = gate();

        assert!(matches!(
            gate.sign_out(&HttpRequest::new()),
            Err(TokenError::MissingToken(_))
        ));
    }
}
