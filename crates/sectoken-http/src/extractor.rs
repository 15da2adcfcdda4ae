//! Pulling a token out of an inbound request.
//!
//! Both extractors fail fast: a request without a usable token is an
//! error, never an empty or default token.

use sectoken_core::{Token, TokenError};

use crate::{
    AUTHORIZATION_HEADER, BEARER, MIN_COOKIE_TOKEN_LEN, SECURITY_TOKEN_COOKIE_NAME, TokenSource,
};

/// Reads the token from the `app_security_token` cookie.
///
/// The first cookie with that name wins.
///
/// # Errors
/// - [`TokenError::MissingToken`] — the request has no cookies, or none
///   named `app_security_token`
/// - [`TokenError::InvalidTokenValue`] — the cookie's value is shorter
///   than [`MIN_COOKIE_TOKEN_LEN`] characters (empty included)
pub fn extract_from_cookies<R>(request: &R) -> Result<Token, TokenError>
where
    R: TokenSource + ?Sized,
{
    let Some(cookies) = request.cookies() else {
        tracing::debug!("request carries no cookies");
        return Err(TokenError::MissingToken("request carries no cookies".into()));
    };

    let Some(cookie) = cookies
        .iter()
        .find(|cookie| cookie.name == SECURITY_TOKEN_COOKIE_NAME)
    else {
        tracing::debug!(
            cookies = cookies.len(),
            "no security token cookie among request cookies"
        );
        return Err(TokenError::MissingToken(format!(
            "no {SECURITY_TOKEN_COOKIE_NAME} cookie"
        )));
    };

    let len = cookie.value.chars().count();
    if len < MIN_COOKIE_TOKEN_LEN {
        tracing::debug!(len, "security token cookie too short");
        return Err(TokenError::InvalidTokenValue(format!(
            "cookie value has {len} characters, at least {MIN_COOKIE_TOKEN_LEN} required"
        )));
    }

    Token::new(cookie.value)
}

/// Reads the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is the first six characters of the header, compared
/// case-insensitively; the token is the rest, trimmed.
///
/// # Errors
/// - [`TokenError::MissingToken`] — no `Authorization` header
/// - [`TokenError::InvalidTokenValue`] — the header is empty, its scheme
///   isn't `bearer`, or nothing follows the scheme
pub fn extract_from_authorization_header<R>(request: &R) -> Result<Token, TokenError>
where
    R: TokenSource + ?Sized,
{
    let Some(authorization) = request.header(AUTHORIZATION_HEADER) else {
        tracing::debug!("request has no authorization header");
        return Err(TokenError::MissingToken("no authorization header".into()));
    };

    if authorization.is_empty() {
        return Err(TokenError::InvalidTokenValue(
            "empty authorization header".into(),
        ));
    }

    // `get` also rejects a split inside a multi-byte character.
    let scheme = authorization.get(..BEARER.len());
    let credentials = authorization.get(BEARER.len()..);
    match (scheme, credentials) {
        (Some(scheme), Some(credentials)) if scheme.eq_ignore_ascii_case(BEARER) => {
            Token::new(credentials.trim())
        }
        _ => {
            tracing::debug!("authorization header is not a bearer credential");
            Err(TokenError::InvalidTokenValue(
                "illegal authorization header".into(),
            ))
        }
    }
}
